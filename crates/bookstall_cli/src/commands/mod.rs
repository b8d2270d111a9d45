//! Command implementations and shared wiring.

pub mod crud;
pub mod session;

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use bookstall_client::{
    ClientConfig, FileCredentialStore, Gateway, NotificationKind, Notifier, ReqwestClient,
    SessionManager,
};
use bookstall_protocol::AdminResource;
use bookstall_store::CollectionStore;
use clap::ValueEnum;

/// The admin resources the CLI can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    /// Book authors
    Authors,
    /// Books in the catalog
    Books,
    /// Publishers
    Publishers,
    /// Stock distributors
    Distributors,
    /// Book categories
    Categories,
    /// Book binding/format types
    BookTypes,
    /// Console user accounts
    Users,
    /// Order workflow states
    OrderStatus,
    /// Refund workflow states
    RefundStatus,
}

/// Everything a command needs: configuration, gateway, session and the
/// notification sink.
pub struct CliContext {
    /// Client configuration.
    pub config: ClientConfig,
    /// Shared notification sink.
    pub notifier: Arc<Notifier>,
    /// The session manager.
    pub session: Arc<SessionManager<ReqwestClient, FileCredentialStore>>,
    /// The shared gateway.
    pub gateway: Arc<Gateway<ReqwestClient, FileCredentialStore>>,
}

impl CliContext {
    /// Wires a context against the given server and credential file.
    pub fn connect(server: &str, credential_path: &Path) -> Result<Self, Box<dyn Error>> {
        let config = ClientConfig::new(server).with_credential_path(credential_path);
        let client = ReqwestClient::new(config.timeout)?;
        let credentials = Arc::new(FileCredentialStore::new(credential_path));
        let notifier = Arc::new(Notifier::new());
        let gateway = Arc::new(Gateway::new(&config, client, Arc::clone(&credentials)));
        let session = Arc::new(SessionManager::new(
            Arc::clone(&gateway),
            credentials,
            Arc::clone(&notifier),
        ));
        Ok(Self {
            config,
            notifier,
            session,
            gateway,
        })
    }

    /// Builds a collection store for resource `R` over the shared wiring.
    pub fn store<R: AdminResource>(
        &self,
    ) -> CollectionStore<R, ReqwestClient, FileCredentialStore> {
        CollectionStore::new(
            Arc::clone(&self.gateway),
            Arc::clone(&self.session),
            Arc::clone(&self.notifier),
        )
    }

    /// Prints the pending notification, if any.
    pub fn print_notification(&self) {
        if let Some(notification) = self.notifier.take() {
            match notification.kind {
                NotificationKind::Success => println!("{}", notification.message),
                NotificationKind::Error => eprintln!("error: {}", notification.message),
            }
        }
    }
}
