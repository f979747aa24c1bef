// ── Response envelope normalization ──
//
// The live backend has shipped several envelope shapes over time
// (`{data, total}`, `{items}`, bare arrays). These helpers collapse them into
// one canonical form. Probe order is part of the contract.

use serde_json::Value;
use tracing::warn;

use crate::model::ListPage;
use crate::model::common::count;

/// Unwrap a single-entity response.
///
/// - `null` yields `fallback`
/// - an object with a `data` key yields that field (`fallback` if it is null)
/// - any other object is returned as-is
/// - arrays and scalars yield `fallback`
pub fn extract_one(response: Value, fallback: Value) -> Value {
    match response {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Null) => fallback,
            Some(data) => data,
            None => Value::Object(map),
        },
        _ => fallback,
    }
}

/// Unwrap a list response into `{list, total}`. Never fails.
pub fn extract_list(response: Value) -> ListPage<Value> {
    let declared_total = response.get("total").and_then(Value::as_u64);

    match response {
        Value::Object(mut map) => {
            let envelope = ["data", "items"]
                .into_iter()
                .find(|key| map.get(*key).is_some_and(Value::is_array));
            if let Some(Value::Array(list)) = envelope.and_then(|key| map.remove(key)) {
                let total = declared_total.unwrap_or_else(|| count(list.len()));
                return ListPage { list, total };
            }
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            warn!(?keys, "list response matched no known envelope; using empty list");
            ListPage::empty()
        }
        Value::Array(list) => ListPage::from_vec(list),
        other => {
            warn!(shape = shape_name(&other), "list response is not an object or array; using empty list");
            ListPage::empty()
        }
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
