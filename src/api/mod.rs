//! MediConnect API access.
//!
//! `BookingApi` is the transport seam between the view models and the
//! network. `ApiClient` is the reqwest implementation; it reads the bearer
//! credential from the session state at send time, interceptor-style, so
//! login and logout take effect on the very next call. `MockApi` is the
//! recording double used by view tests.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use mock::MockApi;
pub use types::{BookingApi, LoginResponse};
