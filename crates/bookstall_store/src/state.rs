//! Collection state and request lifecycle types.

use bookstall_protocol::PageData;

/// Lifecycle of the most recent operation on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing has run yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The most recent operation succeeded.
    Succeeded,
    /// The most recent operation failed.
    Failed,
}

impl RequestStatus {
    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }
}

/// Which operation last ran on the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionAction {
    /// A list fetch.
    Fetch,
    /// A create.
    Create,
    /// An update.
    Update,
    /// A delete.
    Delete,
}

/// The state owned by one collection store.
///
/// Mutated only by the store's canonical operations; views hold read-only
/// snapshots.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    /// The current page, authoritative as of the last successful fetch and
    /// optimistically patched by create/update/delete.
    pub page: PageData<T>,
    /// Lifecycle of the most recent operation.
    pub status: RequestStatus,
    /// Display message of the most recent failure, if any.
    pub last_error: Option<String>,
    /// The most recent operation kind, if any.
    pub last_action: Option<CollectionAction>,
    /// The active search keyword; empty means unfiltered.
    pub keyword: String,
    /// The 1-based page index last requested.
    pub page_index: u32,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            page: PageData::default(),
            status: RequestStatus::Idle,
            last_error: None,
            last_action: None,
            keyword: String::new(),
            page_index: 1,
        }
    }
}

/// Counters describing a store's activity, for observability and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Fetches issued.
    pub fetches: u64,
    /// Creates issued.
    pub creates: u64,
    /// Updates issued.
    pub updates: u64,
    /// Deletes issued.
    pub deletes: u64,
    /// Operations that failed.
    pub failures: u64,
    /// Fetch responses discarded because a later request was issued.
    pub stale_discarded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle_on_page_one() {
        let state = CollectionState::<u32>::default();
        assert_eq!(state.status, RequestStatus::Idle);
        assert_eq!(state.page_index, 1);
        assert!(state.keyword.is_empty());
        assert!(state.page.content.is_empty());
        assert_eq!(state.last_action, None);
    }

    #[test]
    fn loading_predicate() {
        assert!(RequestStatus::Loading.is_loading());
        assert!(!RequestStatus::Succeeded.is_loading());
    }
}
