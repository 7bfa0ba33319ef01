//! Persisted session state.
//!
//! The client keeps exactly two things across restarts: the bearer token
//! and the cached identity. They live together in one JSON document so the
//! pair is written and cleared atomically; a session with only one half is
//! not representable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use training_core::model::{Identity, Session};

use crate::error::VaultError;

/// On-disk shape of the persisted session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VaultRecord {
    auth_token: String,
    user_data: Identity,
}

impl VaultRecord {
    fn from_session(session: &Session) -> Self {
        Self {
            auth_token: session.token().to_owned(),
            user_data: session.identity().clone(),
        }
    }

    fn into_session(self) -> Session {
        Session::new(self.auth_token, self.user_data)
    }
}

/// Storage contract for the persisted session.
///
/// Synchronous on purpose: the startup rehydration path runs before any
/// runtime exists, and the payload is one small JSON document.
pub trait SessionVault: Send + Sync {
    /// Persists the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if the session cannot be written.
    fn store(&self, session: &Session) -> Result<(), VaultError>;

    /// Reads the persisted session, `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Serialization` for a corrupted document;
    /// callers treat that as a dead session.
    fn load(&self) -> Result<Option<Session>, VaultError>;

    /// Removes the persisted session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Io` if the removal fails.
    fn clear(&self) -> Result<(), VaultError>;
}

/// Vault backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionVault {
    path: PathBuf,
}

impl FileSessionVault {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionVault for FileSessionVault {
    fn store(&self, session: &Session) -> Result<(), VaultError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&VaultRecord::from_session(session))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, VaultError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record: VaultRecord = serde_json::from_str(&raw)?;
        Ok(Some(record.into_session()))
    }

    fn clear(&self) -> Result<(), VaultError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory vault for tests. Stores the raw JSON so tests can seed a
/// corrupted document and exercise the recovery path.
#[derive(Default)]
pub struct InMemorySessionVault {
    slot: Mutex<Option<String>>,
}

impl InMemorySessionVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the stored document verbatim, valid JSON or not.
    pub fn seed_raw(&self, raw: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw.into());
        }
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }
}

impl SessionVault for InMemorySessionVault {
    fn store(&self, session: &Session) -> Result<(), VaultError> {
        let json = serde_json::to_string(&VaultRecord::from_session(session))?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| VaultError::Io(std::io::Error::other(e.to_string())))?;
        *slot = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, VaultError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| VaultError::Io(std::io::Error::other(e.to_string())))?;
        match slot.as_deref() {
            None => Ok(None),
            Some(raw) => {
                let record: VaultRecord = serde_json::from_str(raw)?;
                Ok(Some(record.into_session()))
            }
        }
    }

    fn clear(&self) -> Result<(), VaultError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| VaultError::Io(std::io::Error::other(e.to_string())))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_core::model::{AccountStatus, Role, UserId};
    use training_core::time::fixed_now;

    fn session() -> Session {
        let identity = Identity::new(
            UserId::new(3),
            "mgarcia",
            "Maria",
            "Garcia",
            None,
            Role::Client,
            AccountStatus::Active,
            fixed_now(),
        )
        .unwrap();
        Session::new("tok-3".into(), identity)
    }

    #[test]
    fn in_memory_vault_round_trips() {
        let vault = InMemorySessionVault::new();
        assert!(vault.load().unwrap().is_none());

        vault.store(&session()).unwrap();
        let loaded = vault.load().unwrap().unwrap();
        assert_eq!(loaded.token(), "tok-3");
        assert_eq!(loaded.identity().username(), "mgarcia");
    }

    #[test]
    fn corrupted_document_is_an_error_not_a_session() {
        let vault = InMemorySessionVault::new();
        vault.seed_raw("{ not json");
        assert!(matches!(
            vault.load(),
            Err(VaultError::Serialization(_))
        ));
    }

    #[test]
    fn clear_is_idempotent() {
        let vault = InMemorySessionVault::new();
        vault.store(&session()).unwrap();
        vault.clear().unwrap();
        vault.clear().unwrap();
        assert!(vault.is_empty());
    }

    #[test]
    fn file_vault_round_trips_and_clears() {
        let dir = std::env::temp_dir().join("training-vault-test");
        let path = dir.join("session.json");
        let vault = FileSessionVault::new(&path);
        vault.clear().unwrap();

        assert!(vault.load().unwrap().is_none());
        vault.store(&session()).unwrap();
        assert_eq!(vault.load().unwrap().unwrap().token(), "tok-3");

        vault.clear().unwrap();
        assert!(vault.load().unwrap().is_none());
        // missing file clears without error
        vault.clear().unwrap();
    }
}
