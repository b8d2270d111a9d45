//! Credential persistence.
//!
//! The credential store is a leaf component: it holds the access/refresh
//! token pair and nothing else. Both slots are written and cleared together
//! so a reader can never observe half a credential.

use crate::error::{ClientError, ClientResult};
use bookstall_protocol::TokenPair;
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Storage for the live credential pair.
///
/// Only the session manager writes the store; the gateway reads it on every
/// outgoing request.
pub trait CredentialStore: Send + Sync + 'static {
    /// Returns the persisted pair, if one exists.
    fn load(&self) -> Option<TokenPair>;

    /// Persists the pair, replacing any previous one.
    fn store(&self, pair: &TokenPair) -> ClientResult<()>;

    /// Removes both slots. Clearing an empty store is not an error.
    fn clear(&self) -> ClientResult<()>;
}

/// In-process credential store used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    pair: RwLock<Option<TokenPair>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a pair, as after a previous login.
    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            pair: RwLock::new(Some(pair)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<TokenPair> {
        self.pair.read().clone()
    }

    fn store(&self, pair: &TokenPair) -> ClientResult<()> {
        *self.pair.write() = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.pair.write() = None;
        Ok(())
    }
}

/// File-backed credential store.
///
/// Both tokens live in a single JSON file, written via a temp-file rename
/// so the pair is replaced atomically.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<TokenPair> {
        let bytes = fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn store(&self, pair: &TokenPair) -> ClientResult<()> {
        let bytes = serde_json::to_vec_pretty(pair)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load(), None);

        let pair = TokenPair::new("access", "refresh");
        store.store(&pair).unwrap();
        assert_eq!(store.load(), Some(pair));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.load(), None);

        let pair = TokenPair::new("a-token", "r-token");
        store.store(&pair).unwrap();
        assert_eq!(store.load(), Some(pair.clone()));

        // A second store replaces the pair as a whole.
        let replacement = TokenPair::new("a2", "r2");
        store.store(&replacement).unwrap();
        assert_eq!(store.load(), Some(replacement));
    }

    #[test]
    fn file_store_clear_removes_both_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        store.store(&TokenPair::new("a", "r")).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn clearing_an_empty_file_store_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("missing.json"));
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileCredentialStore::new(path);
        assert_eq!(store.load(), None);
    }
}
