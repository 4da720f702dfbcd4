//! Process-wide session record.
//!
//! `AppState` mirrors the persisted session store in memory and is the
//! single reader of the outbound bearer credential. It is hydrated from the
//! store at startup and mutated only by `establish` (login) and `clear`
//! (logout). Wrapped in `Arc` so the API client and the view router share
//! the same instance; `RwLock` allows concurrent reads from in-flight
//! fetches while blocking only on login/logout.

use std::sync::RwLock;

use crate::models::Role;
use crate::session::{Session, SessionError, SessionStore};

/// Errors from AppState operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct AppState {
    session: RwLock<Option<Session>>,
    store: Box<dyn SessionStore>,
}

impl AppState {
    /// Create state hydrated from the persisted store. An unreadable store
    /// is logged and treated as anonymous.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Failed to restore persisted session: {e}");
                None
            }
        };
        Self {
            session: RwLock::new(restored),
            store,
        }
    }

    // ── Read path ───────────────────────────────────────────

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(|s| s.role())
    }

    /// The bearer credential attached to every outbound call, when present.
    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token().to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.session().is_none()
    }

    // ── Write path (login/logout only) ──────────────────────

    /// Enter an authenticated session. Persists the credential and role
    /// together, then mirrors them in memory. A store failure leaves the
    /// session unchanged.
    pub fn establish(&self, role: Role, token: &str) -> Result<(), StateError> {
        let session = Session::new(role, token)?;
        self.store.save(&session)?;

        let mut guard = self.session.write().map_err(|_| StateError::LockPoisoned)?;
        *guard = Some(session);
        tracing::info!(role = role.as_str(), "Session established");
        Ok(())
    }

    /// Leave the session. The persisted entries and the in-memory mirror
    /// are cleared together; store failures are logged, not fatal.
    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear persisted session: {e}");
        }
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
        tracing::info!("Session cleared");
    }
}
