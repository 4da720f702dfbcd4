//! View models for the four top-level screens.
//!
//! Each view owns its fetch results and re-fetches on mount; there is no
//! shared cache or cross-view invalidation. The router is the only state
//! machine; everything else is fetch-then-render.

pub mod admin;
pub mod booking;
pub mod history;
pub mod router;

pub use admin::AdminView;
pub use booking::BookingView;
pub use history::HistoryView;
pub use router::{AuthGate, FormMode, PatientTab, ViewMode};
