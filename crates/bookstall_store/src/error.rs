//! Error types for store operations.

use bookstall_protocol::ApiError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by collection store operations.
///
/// Every failure is also captured in the store's own state (`last_error`)
/// and published as a notification; the returned error exists for callers
/// that want to branch on the outcome.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The server answered 401; the session has been force-closed.
    #[error("your session has expired, please sign in again")]
    SessionExpired,

    /// Any other classified failure, message ready for display.
    #[error("{message}")]
    Rejected {
        /// Human-readable failure message.
        message: String,
        /// The classified failure that produced it.
        #[source]
        source: ApiError,
    },
}

impl StoreError {
    /// Returns true if this failure force-closed the session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, StoreError::SessionExpired)
    }
}
