//! Session state machine and event feed.
//!
//! The session manager is the single source of truth for authentication
//! state. Collection stores that observe a 401 delegate here instead of
//! touching credentials themselves, and the presentation layer subscribes
//! to the event feed to perform the actual redirect to the login screen.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use bookstall_protocol::{ApiError, LoginRequest, TokenPair, UserIdentity};
use parking_lot::RwLock;

use crate::credentials::CredentialStore;
use crate::error::{ClientError, ClientResult};
use crate::gateway::Gateway;
use crate::http::HttpClient;
use crate::notify::{Notification, Notifier};

/// Authentication lifecycle state.
///
/// `Anonymous → Authenticating → Authenticated → LoggingOut → Anonymous`,
/// with `Anonymous` re-entrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No live session.
    Anonymous,
    /// A login attempt is in flight.
    Authenticating,
    /// A session is live.
    Authenticated,
    /// A logout is tearing the session down.
    LoggingOut,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The operator signed out.
    UserRequested,
    /// The server answered 401 somewhere and the session was force-closed.
    SessionExpired,
}

/// Events emitted by the session manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login attempt succeeded.
    SignedIn {
        /// The signed-in identity.
        user: UserIdentity,
    },
    /// The session ended; subscribers should navigate to the login screen.
    SignedOut {
        /// Why the session ended.
        reason: LogoutReason,
    },
}

/// Distributes session events to subscribers.
///
/// Subscribers receive every event emitted after they subscribe;
/// disconnected receivers are dropped on the next emit.
#[derive(Debug, Default)]
pub struct SessionFeed {
    subscribers: RwLock<Vec<Sender<SessionEvent>>>,
}

impl SessionFeed {
    fn new() -> Self {
        Self::default()
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.write().push(tx);
        rx
    }

    fn emit(&self, event: SessionEvent) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

/// Snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current lifecycle state.
    pub auth: AuthState,
    /// The signed-in identity, when authenticated via `login`.
    pub user: Option<UserIdentity>,
}

/// Owns authentication state and the credential store.
pub struct SessionManager<C: HttpClient, S: CredentialStore> {
    gateway: Arc<Gateway<C, S>>,
    credentials: Arc<S>,
    notifier: Arc<Notifier>,
    state: RwLock<SessionState>,
    feed: SessionFeed,
}

impl<C: HttpClient, S: CredentialStore> SessionManager<C, S> {
    /// Creates a session manager.
    ///
    /// The initial state is `Authenticated` iff the credential store holds
    /// a persisted pair; the identity stays unknown until the next login.
    pub fn new(gateway: Arc<Gateway<C, S>>, credentials: Arc<S>, notifier: Arc<Notifier>) -> Self {
        let auth = if credentials.load().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Self {
            gateway,
            credentials,
            notifier,
            state: RwLock::new(SessionState { auth, user: None }),
            feed: SessionFeed::new(),
        }
    }

    /// Returns a snapshot of the session state.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Returns true while a session is live.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().auth == AuthState::Authenticated
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> Receiver<SessionEvent> {
        self.feed.subscribe()
    }

    /// Returns the shared notification sink.
    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    /// Attempts to open a session.
    ///
    /// Exactly one notification is produced per attempt. On failure any
    /// partial credential is cleared and the state stays `Anonymous`.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserIdentity> {
        self.state.write().auth = AuthState::Authenticating;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let outcome = self
            .gateway
            .post::<TokenPair, _>("/auth/login", Vec::new(), &request)
            .await
            .and_then(|envelope| {
                envelope
                    .result
                    .ok_or_else(|| ApiError::Decode("login response missing token pair".into()))
            });

        match outcome {
            Ok(pair) => {
                if let Err(err) = self.credentials.store(&pair) {
                    // A session we cannot persist is a failed attempt.
                    let mut state = self.state.write();
                    state.auth = AuthState::Anonymous;
                    state.user = None;
                    drop(state);
                    self.notifier
                        .publish(Notification::error("Could not persist session credentials"));
                    return Err(err);
                }
                let user = UserIdentity::new(email);
                {
                    let mut state = self.state.write();
                    state.auth = AuthState::Authenticated;
                    state.user = Some(user.clone());
                }
                tracing::debug!(email, "session opened");
                self.notifier.publish(Notification::success("Signed in"));
                self.feed.emit(SessionEvent::SignedIn { user: user.clone() });
                Ok(user)
            }
            Err(err) => {
                if let Err(clear_err) = self.credentials.clear() {
                    tracing::warn!("failed to clear partial credentials: {clear_err}");
                }
                {
                    let mut state = self.state.write();
                    state.auth = AuthState::Anonymous;
                    state.user = None;
                }
                self.notifier
                    .publish(Notification::error(login_failure_message(&err)));
                Err(ClientError::Api(err))
            }
        }
    }

    /// Closes the session at the operator's request.
    pub async fn logout(&self) -> ClientResult<()> {
        self.end_session(LogoutReason::UserRequested).await
    }

    /// Closes the session after a 401 was observed.
    ///
    /// Collection stores call this instead of handling the token
    /// themselves.
    pub async fn expire(&self) -> ClientResult<()> {
        self.end_session(LogoutReason::SessionExpired).await
    }

    /// Tears the session down.
    ///
    /// Safe under concurrent invocation: the check-and-transition plus the
    /// credential clear happen under one lock, so later callers observe a
    /// non-authenticated state, skip the side effects and still resolve
    /// `Ok`. Server-side revocation is best-effort and never blocks the
    /// local teardown.
    async fn end_session(&self, reason: LogoutReason) -> ClientResult<()> {
        let refresh_token = {
            let mut state = self.state.write();
            if state.auth != AuthState::Authenticated {
                return Ok(());
            }
            state.auth = AuthState::LoggingOut;
            state.user = None;
            let pair = self.credentials.load();
            if let Err(err) = self.credentials.clear() {
                tracing::warn!("failed to clear stored credentials: {err}");
            }
            pair.map(|p| p.refresh_token)
        };

        if let Some(refresh_token) = refresh_token {
            let query = vec![("refreshToken".to_string(), refresh_token)];
            if let Err(err) = self
                .gateway
                .post::<serde_json::Value, _>("/auth/logout", query, &serde_json::json!({}))
                .await
            {
                tracing::warn!("server-side session revocation failed: {err}");
            }
        }

        self.state.write().auth = AuthState::Anonymous;
        match reason {
            LogoutReason::UserRequested => {
                self.notifier.publish(Notification::success("Signed out"));
            }
            LogoutReason::SessionExpired => {
                self.notifier.publish(Notification::error(
                    "Your session has expired, please sign in again",
                ));
            }
        }
        self.feed.emit(SessionEvent::SignedOut { reason });
        Ok(())
    }
}

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::NotFound { .. } => "No account exists for that email address".to_string(),
        ApiError::Forbidden { .. } => "This account does not have administrator access".to_string(),
        ApiError::Unauthorized { .. } => "The password is incorrect".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::credentials::MemoryCredentialStore;
    use crate::http::{MockHttpClient, ScriptedResponse};
    use crate::notify::NotificationKind;
    use serde_json::json;
    use std::time::Duration;

    struct Harness {
        mock: MockHttpClient,
        credentials: Arc<MemoryCredentialStore>,
        notifier: Arc<Notifier>,
        session: SessionManager<MockHttpClient, MemoryCredentialStore>,
    }

    fn harness(credentials: MemoryCredentialStore) -> Harness {
        let mock = MockHttpClient::new();
        let credentials = Arc::new(credentials);
        let notifier = Arc::new(Notifier::new());
        let config = ClientConfig::new("http://shop.test");
        let gateway = Arc::new(Gateway::new(&config, mock.clone(), Arc::clone(&credentials)));
        let session = SessionManager::new(gateway, Arc::clone(&credentials), Arc::clone(&notifier));
        Harness {
            mock,
            credentials,
            notifier,
            session,
        }
    }

    fn seeded() -> Harness {
        harness(MemoryCredentialStore::with_pair(TokenPair::new(
            "access-1", "refresh-1",
        )))
    }

    #[test]
    fn startup_state_follows_persisted_credentials() {
        assert_eq!(seeded().session.state().auth, AuthState::Authenticated);
        assert_eq!(
            harness(MemoryCredentialStore::new()).session.state().auth,
            AuthState::Anonymous
        );
    }

    #[tokio::test]
    async fn login_persists_tokens_and_emits_event() {
        let h = harness(MemoryCredentialStore::new());
        let events = h.session.subscribe();
        h.mock.enqueue(ScriptedResponse::envelope(&json!({
            "accessToken": "a-tok",
            "refreshToken": "r-tok",
        })));

        let user = h.session.login("admin@shop.test", "secret").await.unwrap();
        assert_eq!(user.email, "admin@shop.test");
        assert_eq!(
            h.credentials.load(),
            Some(TokenPair::new("a-tok", "r-tok"))
        );
        assert_eq!(h.session.state().auth, AuthState::Authenticated);
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::SignedIn { user }
        );
        assert_eq!(
            h.notifier.current().map(|n| n.kind),
            Some(NotificationKind::Success)
        );
    }

    #[tokio::test]
    async fn login_failure_classifies_by_status() {
        let cases = [
            (404, "No account exists for that email address"),
            (403, "This account does not have administrator access"),
            (401, "The password is incorrect"),
        ];
        for (status, expected) in cases {
            let h = harness(MemoryCredentialStore::new());
            h.mock.enqueue(ScriptedResponse::failure(status, "denied"));

            let err = h.session.login("admin@shop.test", "pw").await;
            assert!(err.is_err());
            assert_eq!(h.session.state().auth, AuthState::Anonymous);
            assert_eq!(h.credentials.load(), None);

            let notification = h.notifier.current().unwrap();
            assert_eq!(notification.kind, NotificationKind::Error);
            assert_eq!(notification.message, expected);
        }
    }

    #[tokio::test]
    async fn login_other_failure_passes_server_message_through() {
        let h = harness(MemoryCredentialStore::new());
        h.mock
            .enqueue(ScriptedResponse::failure(500, "database down"));

        h.session.login("admin@shop.test", "pw").await.unwrap_err();
        let notification = h.notifier.current().unwrap();
        assert!(notification.message.contains("database down"));
    }

    #[tokio::test]
    async fn logout_revokes_clears_and_notifies_once() {
        let h = seeded();
        let events = h.session.subscribe();
        h.mock.enqueue(ScriptedResponse::envelope(&json!(null)));

        h.session.logout().await.unwrap();

        assert_eq!(h.session.state().auth, AuthState::Anonymous);
        assert_eq!(h.credentials.load(), None);
        let revoke = &h.mock.requests()[0];
        assert_eq!(revoke.url, "http://shop.test/auth/logout");
        assert_eq!(revoke.query_value("refreshToken"), Some("refresh-1"));
        // Credentials were cleared before the revoke call went out.
        assert_eq!(revoke.bearer, None);
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::SignedOut {
                reason: LogoutReason::UserRequested
            }
        );
        assert_eq!(h.notifier.take().unwrap().message, "Signed out");
    }

    #[tokio::test]
    async fn logout_survives_failed_revocation() {
        let h = seeded();
        // Nothing scripted: the revoke call fails at the transport level.
        h.session.logout().await.unwrap();
        assert_eq!(h.session.state().auth, AuthState::Anonymous);
        assert_eq!(h.credentials.load(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_logout_is_idempotent() {
        let h = seeded();
        let events = h.session.subscribe();
        // Give the revoke call latency so the second logout overlaps the
        // first one's network await.
        h.mock.enqueue(
            ScriptedResponse::envelope(&json!(null)).with_latency(Duration::from_millis(50)),
        );

        let (first, second) = tokio::join!(h.session.logout(), h.session.logout());
        first.unwrap();
        second.unwrap();

        assert_eq!(h.session.state().auth, AuthState::Anonymous);
        assert_eq!(h.credentials.load(), None);
        // Exactly one revoke call and one signed-out event.
        assert_eq!(h.mock.request_count(), 1);
        assert!(events.try_recv().is_ok());
        assert!(events.try_recv().is_err());
        // And one notification, consumed exactly once.
        assert_eq!(h.notifier.take().unwrap().message, "Signed out");
        assert_eq!(h.notifier.take(), None);
    }

    #[tokio::test]
    async fn logout_when_anonymous_is_a_no_op() {
        let h = harness(MemoryCredentialStore::new());
        h.session.logout().await.unwrap();
        assert_eq!(h.mock.request_count(), 0);
        assert_eq!(h.notifier.current(), None);
    }

    #[tokio::test]
    async fn expire_emits_session_expired() {
        let h = seeded();
        let events = h.session.subscribe();
        h.mock.enqueue(ScriptedResponse::envelope(&json!(null)));

        h.session.expire().await.unwrap();

        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::SignedOut {
                reason: LogoutReason::SessionExpired
            }
        );
        let notification = h.notifier.current().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.message.contains("expired"));
    }
}
