//! # Bookstall Client
//!
//! Authenticated HTTP gateway and session management for the Bookstall
//! admin console.
//!
//! This crate provides:
//! - Credential persistence (access/refresh token pair)
//! - An HTTP gateway that attaches bearer credentials and classifies
//!   failures, without retrying or refreshing
//! - The session manager state machine (anonymous → authenticating →
//!   authenticated → logging out → anonymous)
//! - A session event feed the presentation layer subscribes to for forced
//!   navigation
//! - The notification sink shared by the session manager and every
//!   collection store
//!
//! ## Key invariants
//!
//! - Only the session manager writes the credential store
//! - Logout is idempotent under concurrent invocation
//! - Client-side logout is never blocked by a failing revocation call
//! - The gateway forwards failures unmodified; recovery belongs to callers

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod error;
mod gateway;
mod http;
mod notify;
mod session;

pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ClientError, ClientResult};
pub use gateway::Gateway;
pub use http::{
    FormPart, HttpClient, HttpRequest, HttpResponse, Method, MockHttpClient, MultipartForm,
    ReqwestClient, RequestBody, ScriptedResponse,
};
pub use notify::{Notification, NotificationKind, Notifier};
pub use session::{
    AuthState, LogoutReason, SessionEvent, SessionFeed, SessionManager, SessionState,
};
