//! Session/role gate: selects exactly one renderable top-level mode and
//! owns the login/signup workflow.
//!
//! Transitions:
//! - a successful login is the only way out of the anonymous modes;
//! - logout clears the persisted credential, every form field, and all
//!   messages, and lands on the login form;
//! - the login/signup toggle is a pure local switch (no network effect)
//!   that resets any error/info message.

use std::sync::Arc;

use crate::api::BookingApi;
use crate::app_state::AppState;
use crate::models::Role;

pub const LOGIN_FALLBACK: &str = "Login failed";
pub const SIGNUP_FALLBACK: &str = "Signup failed";
pub const SIGNUP_SUCCESS: &str = "Signup successful. You can now log in.";

/// Which anonymous form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Signup,
}

/// Exactly one renderable top-level mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    AnonymousLogin,
    AnonymousSignup,
    Patient,
    Admin,
}

/// Patient-mode tab switch; a pure local UI mode with no network effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatientTab {
    #[default]
    Book,
    MyAppointments,
}

pub struct AuthGate {
    state: Arc<AppState>,
    api: Arc<dyn BookingApi>,
    mode: FormMode,
    patient_tab: PatientTab,
    username: String,
    password: String,
    full_name: String,
    error: Option<String>,
    info: Option<String>,
}

impl AuthGate {
    pub fn new(state: Arc<AppState>, api: Arc<dyn BookingApi>) -> Self {
        Self {
            state,
            api,
            mode: FormMode::Login,
            patient_tab: PatientTab::default(),
            username: String::new(),
            password: String::new(),
            full_name: String::new(),
            error: None,
            info: None,
        }
    }

    // ── Gate ────────────────────────────────────────────────

    /// Select the renderable mode from (role, form mode).
    pub fn view_mode(&self) -> ViewMode {
        match self.state.role() {
            Some(Role::Patient) => ViewMode::Patient,
            Some(Role::Admin) => ViewMode::Admin,
            None => match self.mode {
                FormMode::Login => ViewMode::AnonymousLogin,
                FormMode::Signup => ViewMode::AnonymousSignup,
            },
        }
    }

    // ── Form state ──────────────────────────────────────────

    pub fn set_username(&mut self, value: &str) {
        self.username = value.to_string();
    }

    pub fn set_password(&mut self, value: &str) {
        self.password = value.to_string();
    }

    pub fn set_full_name(&mut self, value: &str) {
        self.full_name = value.to_string();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn patient_tab(&self) -> PatientTab {
        self.patient_tab
    }

    pub fn select_patient_tab(&mut self, tab: PatientTab) {
        self.patient_tab = tab;
    }

    fn reset_messages(&mut self) {
        self.error = None;
        self.info = None;
    }

    /// Switch between the login and signup forms.
    pub fn toggle(&mut self, mode: FormMode) {
        self.mode = mode;
        self.reset_messages();
    }

    // ── Workflow ────────────────────────────────────────────

    /// Submit the login form. On success the session is established from
    /// the server response (the only entry into patient/admin mode). On
    /// rejection the session is left untouched and the server message (or
    /// fallback) is shown. No retry.
    pub async fn submit_login(&mut self) {
        self.reset_messages();
        let result = self.api.login(&self.username, &self.password).await;
        match result {
            Ok(res) => {
                if let Err(e) = self.state.establish(res.role, &res.token) {
                    tracing::warn!("Failed to persist session: {e}");
                    self.error = Some(LOGIN_FALLBACK.to_string());
                }
            }
            Err(e) => self.error = Some(e.surface(LOGIN_FALLBACK)),
        }
    }

    /// Submit the signup form. Success does not log in: it surfaces an info
    /// message and returns to the login form.
    pub async fn submit_signup(&mut self) {
        self.reset_messages();
        let result = self
            .api
            .register(&self.username, &self.full_name, &self.password)
            .await;
        match result {
            Ok(()) => {
                self.info = Some(SIGNUP_SUCCESS.to_string());
                self.mode = FormMode::Login;
            }
            Err(e) => self.error = Some(e.surface(SIGNUP_FALLBACK)),
        }
    }

    /// Log out: clear the persisted credential and role together, wipe all
    /// form fields and messages, return to the login form.
    pub fn logout(&mut self) {
        self.state.clear();
        self.username.clear();
        self.password.clear();
        self.full_name.clear();
        self.mode = FormMode::Login;
        self.patient_tab = PatientTab::default();
        self.reset_messages();
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;
    use crate::session::{MemorySessionStore, SessionStore};

    fn gate_with(api: MockApi) -> (AuthGate, Arc<MemorySessionStore>, Arc<MockApi>) {
        let store = Arc::new(MemorySessionStore::new());
        let state = Arc::new(AppState::new(Box::new(Arc::clone(&store))));
        let api = Arc::new(api);
        let gate = AuthGate::new(state, Arc::clone(&api) as Arc<dyn BookingApi>);
        (gate, store, api)
    }

    #[test]
    fn gate_starts_at_login() {
        let (gate, _, _) = gate_with(MockApi::new());
        assert_eq!(gate.view_mode(), ViewMode::AnonymousLogin);
    }

    #[test]
    fn toggle_is_local_and_clears_messages() {
        let (mut gate, _, api) = gate_with(MockApi::new());
        gate.error = Some("old error".into());
        gate.info = Some("old info".into());

        gate.toggle(FormMode::Signup);
        assert_eq!(gate.view_mode(), ViewMode::AnonymousSignup);
        assert!(gate.error().is_none());
        assert!(gate.info().is_none());
        assert_eq!(api.call_count(), 0);

        gate.toggle(FormMode::Login);
        assert_eq!(gate.view_mode(), ViewMode::AnonymousLogin);
    }

    #[tokio::test]
    async fn login_success_enters_role_view() {
        let (mut gate, _, _) =
            gate_with(MockApi::new().with_account("jonas", "pw", Role::Patient));
        gate.set_username("jonas");
        gate.set_password("pw");

        gate.submit_login().await;
        assert_eq!(gate.view_mode(), ViewMode::Patient);
        assert!(gate.error().is_none());
    }

    #[tokio::test]
    async fn login_failure_leaves_session_unchanged() {
        let (mut gate, store, _) =
            gate_with(MockApi::new().with_account("jonas", "pw", Role::Patient));
        gate.set_username("jonas");
        gate.set_password("wrong");

        gate.submit_login().await;
        assert_eq!(gate.view_mode(), ViewMode::AnonymousLogin);
        assert_eq!(gate.error(), Some("Invalid username or password"));
        assert!(store.load().unwrap().is_none());
        // Fields are preserved for another attempt.
        assert_eq!(gate.username(), "jonas");
    }

    #[tokio::test]
    async fn login_fallback_without_server_message() {
        let (mut gate, _, _) = gate_with(MockApi::new().rejecting(500, None));
        gate.set_username("jonas");
        gate.set_password("pw");

        gate.submit_login().await;
        assert_eq!(gate.error(), Some(LOGIN_FALLBACK));
    }

    #[tokio::test]
    async fn signup_success_returns_to_login_without_session() {
        let (mut gate, store, api) = gate_with(MockApi::new());
        gate.toggle(FormMode::Signup);
        gate.set_username("jonas");
        gate.set_full_name("Jonas Weber");
        gate.set_password("pw");

        gate.submit_signup().await;
        assert_eq!(gate.view_mode(), ViewMode::AnonymousLogin);
        assert_eq!(gate.info(), Some(SIGNUP_SUCCESS));
        assert!(store.load().unwrap().is_none());
        assert_eq!(api.calls(), vec!["register(jonas)"]);
    }

    #[tokio::test]
    async fn signup_failure_stays_on_signup_with_message() {
        let (mut gate, _, _) =
            gate_with(MockApi::new().rejecting(400, Some("Username already exists")));
        gate.toggle(FormMode::Signup);
        gate.set_username("jonas");

        gate.submit_signup().await;
        assert_eq!(gate.view_mode(), ViewMode::AnonymousSignup);
        assert_eq!(gate.error(), Some("Username already exists"));
    }

    #[tokio::test]
    async fn admin_login_logout_scenario() {
        let (mut gate, store, _) =
            gate_with(MockApi::new().with_account("admin", "admin123", Role::Admin));
        gate.set_username("admin");
        gate.set_password("admin123");

        gate.submit_login().await;
        assert_eq!(gate.view_mode(), ViewMode::Admin);
        assert!(store.load().unwrap().is_some());

        gate.logout();
        assert_eq!(gate.view_mode(), ViewMode::AnonymousLogin);
        assert!(store.load().unwrap().is_none());
        assert_eq!(gate.username(), "");
        assert_eq!(gate.full_name(), "");
        assert!(gate.error().is_none());
        assert!(gate.info().is_none());
    }

    #[tokio::test]
    async fn patient_tab_is_local_and_resets_on_logout() {
        let (mut gate, _, api) =
            gate_with(MockApi::new().with_account("jonas", "pw", Role::Patient));
        gate.set_username("jonas");
        gate.set_password("pw");
        gate.submit_login().await;

        let calls_before = api.call_count();
        gate.select_patient_tab(PatientTab::MyAppointments);
        assert_eq!(gate.patient_tab(), PatientTab::MyAppointments);
        assert_eq!(api.call_count(), calls_before);

        gate.logout();
        assert_eq!(gate.patient_tab(), PatientTab::Book);
    }
}
