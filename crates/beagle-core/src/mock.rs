// ── Fixture-backed source helpers ──
//
// Slicing, keyword filtering, and simulated latency for the mock path.
// Everything here is pure apart from `delay`, which only suspends the
// calling task.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::model::ListPage;
use crate::model::common::count;

/// Return page `page` (1-indexed) of `items`, `page_size` items per page.
///
/// `total` is always the full collection length. Pages past the end, page
/// `0`, and a zero page size all yield an empty list.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> ListPage<T> {
    let total = count(items.len());
    if page == 0 || page_size == 0 {
        return ListPage {
            list: Vec::new(),
            total,
        };
    }

    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let list = usize::try_from(page - 1)
        .ok()
        .and_then(|index| index.checked_mul(size))
        .and_then(|start| items.get(start..))
        .map(|rest| rest.iter().take(size).cloned().collect())
        .unwrap_or_default();

    ListPage { list, total }
}

/// Keep the items where any of `fields` contains `keyword`, ignoring case.
///
/// Fields are looked up on the serialized (camelCase) form; dotted names
/// reach into nested objects. An empty keyword returns every item.
pub fn search<T: Clone + Serialize>(items: &[T], keyword: &str, fields: &[&str]) -> Vec<T> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            let Ok(value) = serde_json::to_value(item) else {
                return false;
            };
            fields.iter().any(|field| {
                lookup(&value, field)
                    .and_then(searchable_text)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// Suspend the calling task for `duration`. Zero returns immediately.
pub async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Text form of a scalar. Null, empty strings, zero and `false` never match.
fn searchable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".into()),
        _ => None,
    }
}
