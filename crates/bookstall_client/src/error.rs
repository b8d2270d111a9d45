//! Error types for the client crate.

use bookstall_protocol::ApiError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by the gateway, credential stores and session manager.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A classified API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Credential persistence failed.
    #[error("credential storage error: {0}")]
    Storage(String),

    /// The HTTP transport could not be constructed.
    #[error("transport setup error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Returns the underlying API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if this failure is the 401 session-expiry signal.
    pub fn is_unauthorized(&self) -> bool {
        self.as_api().map(ApiError::is_unauthorized).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_detected_through_wrapper() {
        let err = ClientError::from(ApiError::Unauthorized {
            message: "expired".into(),
        });
        assert!(err.is_unauthorized());
        assert!(!ClientError::Storage("disk full".into()).is_unauthorized());
    }
}
