//! # Bookstall Store
//!
//! The generic collection store behind every admin screen, plus the
//! debounced query coordinator that feeds keyword search into it.
//!
//! One [`CollectionStore`] is instantiated per admin resource (authors,
//! books, publishers, ...) and owns that resource's paginated, searchable
//! state. All nine screens share this one implementation; only the
//! [`bookstall_protocol::AdminResource`] parameter differs.
//!
//! ## Key invariants
//!
//! - State changes only through the five canonical operations (fetch,
//!   create, update, delete, search reset)
//! - A fetch response that is no longer the latest issued request is
//!   discarded; the last request always wins
//! - Fetch failures keep the last good page, so the screen shows stale
//!   data under an error banner instead of going blank
//! - Create and update mutate the held page optimistically from the
//!   operation's own response; no re-fetch is issued
//! - Any 401 delegates to the session manager before the error surfaces

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod debounce;
mod error;
mod state;
mod store;

pub use debounce::{normalize_keyword, QueryDebouncer};
pub use error::{StoreError, StoreResult};
pub use state::{CollectionAction, CollectionState, RequestStatus, StoreStats};
pub use store::CollectionStore;
