//! Session state management
//!
//! The single injected session provider for the crate. The token and user
//! record returned by a successful login are persisted as one JSON file for
//! the lifetime of the login, read at operation entry, and cleared wholesale
//! on logout. There is no token refresh.

use crate::client::models::User;
use crate::core::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An authenticated session: exactly the token and user object returned by
/// the server, and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// File-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, if any.
    ///
    /// A corrupt state file is surfaced as a session error rather than
    /// silently treated as logged-out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&raw).map_err(|e| {
            PortalError::Session(format!(
                "corrupt state file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(session))
    }

    /// Read the stored session, failing when none is present
    pub fn current(&self) -> Result<Session> {
        self.load()?.ok_or(PortalError::NotAuthenticated)
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| PortalError::Session(format!("failed to encode session: {}", e)))?;
        std::fs::write(&self.path, raw)?;

        tracing::debug!(path = %self.path.display(), user_id = session.user.id, "Session saved");
        Ok(())
    }

    /// Clear all session state. Idempotent.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{KycStatus, Role};
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            token: "tok-abc123".to_string(),
            user: User {
                id: 42,
                name: "Ayesha Khan".to_string(),
                email: Some("ayesha@example.com".to_string()),
                role: Role::Customer,
                status: KycStatus::Verified,
            },
        }
    }

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("state").join("session.json"))
    }

    #[test]
    fn test_load_when_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_none());
        assert!(matches!(
            store.current(),
            Err(PortalError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let session = sample_session();

        store.save(&session).unwrap();
        assert_eq!(store.current().unwrap(), session);
    }

    #[test]
    fn test_clear_removes_state() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample_session()).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_state_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(PortalError::Session(_))));
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample_session()).unwrap();

        let mut second = sample_session();
        second.token = "tok-next".to_string();
        second.user.id = 7;
        store.save(&second).unwrap();

        assert_eq!(store.current().unwrap(), second);
    }
}
