//! Mock API for view-model tests.
//!
//! Returns configurable data and records every call, so tests can assert
//! both what a view did and what it never attempted (the local-validation
//! properties are all "zero calls recorded").

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::models::{AdminAppointment, AdminStats, Appointment, AppointmentStatus, Doctor, Role};

use super::error::ApiError;
use super::types::{BookingApi, LoginResponse};

#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    admin_appointments: Vec<AdminAppointment>,
    stats: AdminStats,
    accounts: Vec<(String, String, Role)>,
    rejection: Option<(u16, Option<String>)>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.doctors = doctors;
        self
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }

    pub fn with_admin_appointments(mut self, appointments: Vec<AdminAppointment>) -> Self {
        self.admin_appointments = appointments;
        self
    }

    pub fn with_stats(mut self, stats: AdminStats) -> Self {
        self.stats = stats;
        self
    }

    /// Register a known account for `login`.
    pub fn with_account(mut self, username: &str, password: &str, role: Role) -> Self {
        self.accounts
            .push((username.to_string(), password.to_string(), role));
        self
    }

    /// Reject every call with the given status and optional server message.
    pub fn rejecting(mut self, status: u16, message: Option<&str>) -> Self {
        self.rejection = Some((status, message.map(|m| m.to_string())));
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn record(&self, call: impl Into<String>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.into());
        }
    }

    fn check_rejection(&self) -> Result<(), ApiError> {
        match &self.rejection {
            Some((status, message)) => Err(ApiError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn parse_time(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .or_else(|_| raw.parse())
            .unwrap_or_else(|_| "2030-01-01T00:00:00".parse().unwrap())
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.record(format!("login({username})"));
        self.check_rejection()?;
        self.accounts
            .iter()
            .find(|(u, p, _)| u == username && p == password)
            .map(|(u, _, role)| LoginResponse {
                token: format!("token-{u}"),
                role: *role,
                username: u.clone(),
            })
            .ok_or(ApiError::Rejected {
                status: 401,
                message: Some("Invalid username or password".into()),
            })
    }

    async fn register(
        &self,
        username: &str,
        _full_name: &str,
        _password: &str,
    ) -> Result<(), ApiError> {
        self.record(format!("register({username})"));
        self.check_rejection()
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.record("list_doctors");
        self.check_rejection()?;
        Ok(self.doctors.clone())
    }

    async fn create_doctor(&self, name: &str, specialization: &str) -> Result<Doctor, ApiError> {
        self.record(format!("create_doctor({name})"));
        self.check_rejection()?;
        Ok(Doctor {
            id: self.doctors.len() as i64 + 1,
            name: name.to_string(),
            specialization: specialization.to_string(),
        })
    }

    async fn book_appointment(
        &self,
        doctor_id: i64,
        appointment_time: &str,
    ) -> Result<Appointment, ApiError> {
        self.record(format!("book_appointment({doctor_id})"));
        self.check_rejection()?;
        Ok(Appointment {
            id: 1,
            doctor_id,
            doctor_name: "Dr. Mock".into(),
            specialization: "General".into(),
            appointment_time: Self::parse_time(appointment_time),
            status: AppointmentStatus::Pending,
        })
    }

    async fn my_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.record("my_appointments");
        self.check_rejection()?;
        Ok(self.appointments.clone())
    }

    async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.record("admin_stats");
        self.check_rejection()?;
        Ok(self.stats.clone())
    }

    async fn admin_appointments(&self) -> Result<Vec<AdminAppointment>, ApiError> {
        self.record("admin_appointments");
        self.check_rejection()?;
        Ok(self.admin_appointments.clone())
    }

    async fn set_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<AdminAppointment, ApiError> {
        self.record(format!("set_status({id}, {})", status.as_str()));
        self.check_rejection()?;
        self.admin_appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .map(|mut a| {
                a.status = status;
                a
            })
            .ok_or(ApiError::Rejected {
                status: 404,
                message: Some("Appointment not found".into()),
            })
    }
}
