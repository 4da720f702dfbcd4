//! Request/response shapes and the transport seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{AdminAppointment, AdminStats, Appointment, AppointmentStatus, Doctor, Role};

use super::error::ApiError;

// ═══════════════════════════════════════════════════════════
// Request bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub full_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateDoctorRequest<'a> {
    pub name: &'a str,
    pub specialization: &'a str,
}

/// The appointment time is sent as the raw `YYYY-MM-DDTHH:MM` string the
/// user selected; the server parses it as a local date-time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest<'a> {
    pub doctor_id: i64,
    pub appointment_time: &'a str,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
}

// ═══════════════════════════════════════════════════════════
// Response bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub username: String,
}

/// Rejection body shape: `{ timestamp, message, details }`.
/// Only `message` is surfaced to the user.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

// ═══════════════════════════════════════════════════════════
// Transport seam
// ═══════════════════════════════════════════════════════════

/// The nine calls the client makes, one per remote operation.
///
/// View models depend on this trait, never on `reqwest`, so tests can swap
/// in a recording double and assert which calls were (not) made.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Registration success is opaque; the response body is discarded.
    async fn register(
        &self,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<(), ApiError>;

    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError>;

    async fn create_doctor(&self, name: &str, specialization: &str) -> Result<Doctor, ApiError>;

    async fn book_appointment(
        &self,
        doctor_id: i64,
        appointment_time: &str,
    ) -> Result<Appointment, ApiError>;

    async fn my_appointments(&self) -> Result<Vec<Appointment>, ApiError>;

    async fn admin_stats(&self) -> Result<AdminStats, ApiError>;

    async fn admin_appointments(&self) -> Result<Vec<AdminAppointment>, ApiError>;

    async fn set_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<AdminAppointment, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_request_serializes_wire_names() {
        let req = BookRequest {
            doctor_id: 7,
            appointment_time: "2030-05-01T09:30",
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"doctorId":7,"appointmentTime":"2030-05-01T09:30"}"#);
    }

    #[test]
    fn register_request_serializes_wire_names() {
        let req = RegisterRequest {
            username: "jonas",
            full_name: "Jonas Weber",
            password: "secret",
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"fullName\":\"Jonas Weber\""));
    }

    #[test]
    fn status_update_serializes_wire_string() {
        let req = StatusUpdateRequest {
            status: AppointmentStatus::Cancelled,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"status":"CANCELLED"}"#);
    }

    #[test]
    fn login_response_deserializes() {
        let json = r#"{"token": "jwt-abc", "role": "ADMIN", "username": "admin"}"#;
        let res: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.token, "jwt-abc");
        assert_eq!(res.role, Role::Admin);
        assert_eq!(res.username, "admin");
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());

        let body: ErrorBody =
            serde_json::from_str(r#"{"timestamp": "2030-01-01T00:00:00", "message": "nope", "details": "d"}"#)
                .unwrap();
        assert_eq!(body.message.as_deref(), Some("nope"));
    }
}
