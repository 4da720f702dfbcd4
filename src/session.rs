//! Persisted session: role + bearer credential.
//!
//! The persistent layout is exactly two string entries, `token` and `role`,
//! under fixed keys in one JSON document. Both are written on login and
//! cleared together on logout. All storage access goes through the
//! `SessionStore` trait so nothing else in the crate touches the disk layout.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use crate::models::Role;

/// Fixed storage keys.
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";

/// Errors from session construction and store access.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session credential is empty")]
    EmptyCredential,
    #[error("Stored role is invalid: {0}")]
    InvalidRole(String),
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session store parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

/// An authenticated session.
///
/// Construction enforces the invariant that a role never exists without a
/// non-empty credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    role: Role,
    token: String,
}

impl Session {
    pub fn new(role: Role, token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.is_empty() {
            return Err(SessionError::EmptyCredential);
        }
        Ok(Self { role, token })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// ═══════════════════════════════════════════════════════════
// SessionStore: persisted credential behind one seam
// ═══════════════════════════════════════════════════════════

pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any. A missing record reads as
    /// anonymous.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Persist token and role together.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove both entries together.
    fn clear(&self) -> Result<(), SessionError>;
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        (**self).save(session)
    }

    fn clear(&self) -> Result<(), SessionError> {
        (**self).clear()
    }
}

/// File-backed store at a fixed path (see `config::session_file`).
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let doc: serde_json::Value = serde_json::from_str(&raw)?;

        // Both entries or nothing: a partial record reads as anonymous.
        let (Some(token), Some(role)) = (
            doc.get(TOKEN_KEY).and_then(|v| v.as_str()),
            doc.get(ROLE_KEY).and_then(|v| v.as_str()),
        ) else {
            return Ok(None);
        };

        let role = Role::from_str(role)
            .map_err(|e| SessionError::InvalidRole(e.value))?;
        Ok(Some(Session::new(role, token)?))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut doc = serde_json::Map::new();
        doc.insert(TOKEN_KEY.to_string(), session.token().into());
        doc.insert(ROLE_KEY.to_string(), session.role().as_str().into());
        let doc = serde_json::Value::Object(doc);
        std::fs::write(&self.path, serde_json::to_string_pretty(&doc)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and embedders without a home directory.
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let guard = self.session.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let mut guard = self.session.lock().map_err(|_| SessionError::LockPoisoned)?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.session.lock().map_err(|_| SessionError::LockPoisoned)?;
        *guard = None;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn session_requires_credential() {
        let err = Session::new(Role::Patient, "").unwrap_err();
        assert!(matches!(err, SessionError::EmptyCredential));
    }

    #[test]
    fn missing_file_reads_as_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_round_trips_token_and_role() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let session = Session::new(Role::Admin, "jwt-abc").unwrap();
        store.save(&session).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored.role(), Role::Admin);
        assert_eq!(restored.token(), "jwt-abc");
    }

    #[test]
    fn file_layout_uses_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .save(&Session::new(Role::Patient, "jwt-xyz").unwrap())
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc[TOKEN_KEY], "jwt-xyz");
        assert_eq!(doc[ROLE_KEY], "PATIENT");
    }

    #[test]
    fn clear_removes_both_entries_together() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .save(&Session::new(Role::Patient, "jwt-xyz").unwrap())
            .unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_on_empty_store_is_safe() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.clear().is_ok());
    }

    #[test]
    fn partial_record_reads_as_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"token": "jwt-abc"}"#).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn unknown_role_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"token": "jwt-abc", "role": "ROOT"}"#).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, SessionError::InvalidRole(v) if v == "ROOT"));
    }

    #[test]
    fn corrupted_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Parse(_))));
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store
            .save(&Session::new(Role::Admin, "jwt-abc").unwrap())
            .unwrap();
        assert_eq!(store.load().unwrap().unwrap().role(), Role::Admin);

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
