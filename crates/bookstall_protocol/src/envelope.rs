//! Response envelope and pagination types.

use serde::{Deserialize, Serialize};

/// The JSON envelope every admin endpoint returns.
///
/// A transport-level success (HTTP 2xx) may still carry `success: false`,
/// in which case `message` explains the rejection and `result` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the server accepted the request.
    pub success: bool,
    /// Human-readable outcome message.
    #[serde(default)]
    pub message: String,
    /// Endpoint-specific payload, absent on rejection.
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Consumes the envelope, returning the payload if one is present.
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}

/// One page of a collection, as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    /// Items on this page. Never longer than the requested page size.
    pub content: Vec<T>,
    /// Total number of pages for the current keyword/filter combination.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_elements: u64,
}

impl<T> PageData<T> {
    /// Returns true if the collection has no items at all.
    pub fn is_empty(&self) -> bool {
        self.total_elements == 0
    }
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }
}

/// Query parameters for a list request.
///
/// Serializes to `index`, `size` and `keyword` query pairs plus any extra
/// resource-specific filters. `index` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    /// 1-based page index.
    pub index: u32,
    /// Requested page size.
    pub size: u32,
    /// Search keyword; the empty string means "no keyword".
    pub keyword: String,
    /// Extra resource-specific filter pairs, passed through verbatim.
    pub filters: Vec<(String, String)>,
}

impl PageQuery {
    /// Creates a query for the given page with no keyword or filters.
    pub fn new(index: u32, size: u32) -> Self {
        Self {
            index,
            size,
            keyword: String::new(),
            filters: Vec::new(),
        }
    }

    /// Sets the search keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Appends an extra filter pair.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Renders the query as URL query pairs.
    ///
    /// `index`, `size` and `keyword` are always present; the keyword is sent
    /// even when empty so that clearing a search box reaches the server.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("index".to_string(), self.index.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("keyword".to_string(), self.keyword.clone()),
        ];
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}
