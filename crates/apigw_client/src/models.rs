//! # Models
//!
//! Types shared by several resource families.
//!
//! Entity types live next to their endpoints (see [`crate::product`] and
//! friends); this module holds the shapes that are common to all of them.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// One page of a paged list response.
///
/// List endpoints answer with `{"<entity>Page": {"content": [...], "total": n}}`.
/// After key conversion the wrapper key becomes `<entity>_page` and the page
/// itself deserializes into this type.
///
/// # Examples
///
/// ```rust
/// use apigw_client::Page;
///
/// let page: Page<String> = serde_json::from_str(r#"{"content": ["a", "b"], "total": 7}"#).unwrap();
/// assert_eq!(page.content.len(), 2);
/// assert_eq!(page.total, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The entities on this page
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    /// Total number of entities across all pages
    #[serde(default)]
    pub total: Option<i64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total: None,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Paging parameters accepted by every list endpoint.
///
/// Flattened into the endpoint specific query types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Paging {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }
}
