//! HTTP client for the MediConnect API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::app_state::AppState;
use crate::models::{AdminAppointment, AdminStats, Appointment, AppointmentStatus, Doctor};

use super::error::ApiError;
use super::types::{
    BookRequest, BookingApi, CreateDoctorRequest, ErrorBody, LoginRequest, LoginResponse,
    RegisterRequest, StatusUpdateRequest,
};

/// Reqwest-backed implementation of `BookingApi`.
///
/// Reads the bearer credential from shared state on every request. By
/// default no request timeout is set, so a request that never resolves
/// hangs its view; `with_timeout` opts in to a bounded wait for embedders
/// that prefer a failed view over a hung one.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    state: Arc<AppState>,
    timeout_secs: Option<u64>,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://host:8081/api`).
    pub fn new(base_url: &str, state: Arc<AppState>) -> Self {
        Self::build(base_url, state, None)
    }

    /// Same client with a per-request timeout in seconds.
    pub fn with_timeout(base_url: &str, state: Arc<AppState>, timeout_secs: u64) -> Self {
        Self::build(base_url, state, Some(timeout_secs))
    }

    fn build(base_url: &str, state: Arc<AppState>, timeout_secs: Option<u64>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            state,
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request with the bearer credential attached when one is
    /// present in the session state.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "API request");
        let mut req = self.client.request(method, url);
        if let Some(token) = self.state.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let response = self.dispatch(req).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))
    }

    /// Variant for calls whose success body is opaque.
    async fn send_unit(&self, req: RequestBuilder) -> Result<(), ApiError> {
        self.dispatch(req).await.map(|_| ())
    }

    async fn dispatch(&self, req: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = req.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            tracing::debug!(status = status.as_u16(), "API rejection");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    fn map_transport(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs.unwrap_or_default())
        } else {
            ApiError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { username, password };
        self.send(self.request(Method::POST, "/auth/login").json(&body))
            .await
    }

    async fn register(
        &self,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let body = RegisterRequest {
            username,
            full_name,
            password,
        };
        self.send_unit(self.request(Method::POST, "/auth/register").json(&body))
            .await
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.send(self.request(Method::GET, "/doctors")).await
    }

    async fn create_doctor(&self, name: &str, specialization: &str) -> Result<Doctor, ApiError> {
        let body = CreateDoctorRequest {
            name,
            specialization,
        };
        self.send(self.request(Method::POST, "/doctors").json(&body))
            .await
    }

    async fn book_appointment(
        &self,
        doctor_id: i64,
        appointment_time: &str,
    ) -> Result<Appointment, ApiError> {
        let body = BookRequest {
            doctor_id,
            appointment_time,
        };
        self.send(self.request(Method::POST, "/appointments").json(&body))
            .await
    }

    async fn my_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.send(self.request(Method::GET, "/appointments/me"))
            .await
    }

    async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.send(self.request(Method::GET, "/admin/stats")).await
    }

    async fn admin_appointments(&self) -> Result<Vec<AdminAppointment>, ApiError> {
        self.send(self.request(Method::GET, "/admin/appointments"))
            .await
    }

    async fn set_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<AdminAppointment, ApiError> {
        let body = StatusUpdateRequest { status };
        let path = format!("/admin/appointments/{id}/status");
        self.send(self.request(Method::PATCH, &path).json(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    fn client(base_url: &str) -> ApiClient {
        let state = Arc::new(AppState::new(Box::new(MemorySessionStore::new())));
        ApiClient::new(base_url, state)
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = client("http://localhost:8081/api/");
        assert_eq!(client.base_url(), "http://localhost:8081/api");
    }

    #[test]
    fn client_keeps_clean_base_url() {
        let client = client("http://localhost:8081/api");
        assert_eq!(client.base_url(), "http://localhost:8081/api");
    }

    #[test]
    fn default_client_has_no_timeout() {
        let client = client("http://localhost:8081/api");
        assert!(client.timeout_secs.is_none());
    }

    #[test]
    fn with_timeout_records_the_bound() {
        let state = Arc::new(AppState::new(Box::new(MemorySessionStore::new())));
        let client = ApiClient::with_timeout("http://localhost:8081/api", state, 30);
        assert_eq!(client.timeout_secs, Some(30));
    }
}
