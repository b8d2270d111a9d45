//! Authentication messages.

use serde::{Deserialize, Serialize};

/// Credentials submitted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// The bearer credential pair issued on login.
///
/// Both tokens are opaque to the client. Exactly one pair is live at a
/// time; the pair is persisted together and cleared together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Token attached as `Authorization: Bearer` on every request.
    pub access_token: String,
    /// Token presented to the server when revoking the session.
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a token pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// The identity of the signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Email address the session was opened with.
    pub email: String,
}

impl UserIdentity {
    /// Creates an identity for the given email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
