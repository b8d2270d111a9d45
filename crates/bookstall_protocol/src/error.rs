//! Failure taxonomy for admin API operations.

use thiserror::Error;

/// Result type for protocol-level operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the gateway to collection stores and the session
/// manager.
///
/// Every failure preserves the server-supplied message where one exists.
/// `Unauthorized` is the one variant with cross-cutting semantics: any
/// operation receiving it escalates to a forced logout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never reached the server or no response came back.
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401. Always escalates to session termination.
    #[error("not authorized: {message}")]
    Unauthorized {
        /// Server-supplied message.
        message: String,
    },

    /// HTTP 403, a role-based rejection.
    #[error("access denied: {message}")]
    Forbidden {
        /// Server-supplied message.
        message: String,
    },

    /// HTTP 404.
    #[error("the requested entity no longer exists")]
    NotFound {
        /// Server-supplied message, kept for diagnostics.
        message: String,
    },

    /// HTTP 400/422, the server rejected a submitted field.
    #[error("{human}")]
    Validation {
        /// Field name recognized in the server message, if any.
        field: Option<String>,
        /// Human-readable message shown to the operator.
        human: String,
    },

    /// Any other HTTP failure status.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed server response: {0}")]
    Decode(String),

    /// HTTP 2xx with `success: false` in the envelope.
    #[error("{message}")]
    Rejected {
        /// Envelope message.
        message: String,
    },
}

impl ApiError {
    /// Returns true for HTTP 401, the session-expiry signal.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Returns true if the failure never reached the server.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Field-name tokens recognized in validation messages, with the human
/// message each maps to.
const FIELD_MESSAGES: &[(&str, &str)] = &[
    ("email", "The email address is not valid"),
    ("password", "The password does not meet the requirements"),
    ("name", "The name field is missing or empty"),
    ("price", "The price must be a positive amount"),
    ("quantity", "The quantity must be a whole number"),
    ("phone", "The phone number is not valid"),
    ("address", "The address field is not valid"),
];

const VALIDATION_FALLBACK: &str = "The submitted data was rejected by the server";

/// Classifies a failure status code into the error taxonomy.
///
/// The server message is preserved verbatim except for validation failures,
/// which are mapped to a field-specific human message when the server
/// message contains a recognizable field-name token.
pub fn classify_status(status: u16, message: impl Into<String>) -> ApiError {
    let message = message.into();
    match status {
        401 => ApiError::Unauthorized { message },
        403 => ApiError::Forbidden { message },
        404 => ApiError::NotFound { message },
        400 | 422 => validation_error(message),
        status => ApiError::Server { status, message },
    }
}

fn validation_error(message: String) -> ApiError {
    let lowered = message.to_lowercase();
    for (token, human) in FIELD_MESSAGES {
        if lowered.contains(token) {
            return ApiError::Validation {
                field: Some((*token).to_string()),
                human: (*human).to_string(),
            };
        }
    }
    ApiError::Validation {
        field: None,
        human: if message.is_empty() {
            VALIDATION_FALLBACK.to_string()
        } else {
            message
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        assert!(classify_status(401, "expired").is_unauthorized());
        assert!(matches!(
            classify_status(403, "admins only"),
            ApiError::Forbidden { .. }
        ));
        assert!(matches!(
            classify_status(404, "gone"),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            classify_status(500, "boom"),
            ApiError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn validation_recognizes_field_tokens() {
        let err = classify_status(422, "Field 'email' is malformed");
        match err {
            ApiError::Validation { field, human } => {
                assert_eq!(field.as_deref(), Some("email"));
                assert_eq!(human, "The email address is not valid");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn validation_without_token_passes_message_through() {
        let err = classify_status(400, "something odd happened");
        match err {
            ApiError::Validation { field, human } => {
                assert_eq!(field, None);
                assert_eq!(human, "something odd happened");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn empty_validation_message_gets_fallback() {
        let err = classify_status(422, "");
        match err {
            ApiError::Validation { field: None, human } => {
                assert_eq!(human, VALIDATION_FALLBACK);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn server_message_is_preserved() {
        let err = classify_status(500, "database unavailable");
        assert_eq!(err.to_string(), "server error (500): database unavailable");
    }

    #[test]
    fn not_found_displays_human_message() {
        let err = classify_status(404, "book 12 not in catalog");
        assert_eq!(err.to_string(), "the requested entity no longer exists");
    }

    proptest! {
        #[test]
        fn classification_is_total(status in 100u16..600, message in ".{0,80}") {
            // Every status/message combination classifies without panicking
            // and 401 is the only unauthorized source.
            let err = classify_status(status, message);
            prop_assert_eq!(err.is_unauthorized(), status == 401);
        }
    }
}
