//! MediConnect client core.
//!
//! Headless implementation of the MediConnect booking front-end: session
//! state and persistence, the role-gated view router, per-screen view
//! models, cancellable fetch tasks, and the HTTP client for the remote
//! API. Presentation lives in the binary; everything testable lives here.

pub mod api;
pub mod app_state;
pub mod config;
pub mod fetch;
pub mod models;
pub mod session;
pub mod views;
