// ── Shared list types ──

use serde::{Deserialize, Deserializer, Serialize};

/// One page of a collection plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub list: Vec<T>,
    pub total: u64,
}

impl<T> ListPage<T> {
    pub fn empty() -> Self {
        Self {
            list: Vec::new(),
            total: 0,
        }
    }

    /// A page holding the whole collection.
    pub fn from_vec(list: Vec<T>) -> Self {
        let total = count(list.len());
        Self { list, total }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Query parameters accepted by every `get_list` call.
///
/// Unset fields fall back to page 1, 10 items per page, no keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub keyword: Option<String>,
}

impl ListParams {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }

    /// Query string pairs for the live API. Unset fields are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(3);
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(ref keyword) = self.keyword {
            if !keyword.is_empty() {
                query.push(("keyword", keyword.clone()));
            }
        }
        query
    }
}

/// Field deserializer that reads an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers absent keys; the Go backend encodes nil
/// strings, maps and slices as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Collection length as a wire-level total.
pub(crate) fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
