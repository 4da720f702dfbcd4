//! Admin dashboard: aggregate stats, doctor creation, and the appointment
//! status workflow.

use std::sync::Arc;

use crate::api::{ApiError, BookingApi};
use crate::fetch::FetchTask;
use crate::models::{AdminAppointment, AdminStats, AppointmentStatus};

pub const MSG_DOCTOR_FIELDS: &str = "Please enter doctor name and specialization";
pub const MSG_DOCTOR_CREATED: &str = "Doctor created successfully";
pub const CREATE_DOCTOR_FALLBACK: &str = "Failed to create doctor";
pub const STATUS_FALLBACK: &str = "Failed to update status";

/// A transition control is live only when the appointment is not already in
/// the target state.
pub fn transition_enabled(appointment: &AdminAppointment, target: AppointmentStatus) -> bool {
    appointment.status != target
}

/// Confirmation reducer: replace the status of exactly one appointment,
/// leaving every other row untouched. Applied only after the server has
/// accepted the transition.
pub fn apply_status_update(
    appointments: &mut [AdminAppointment],
    id: i64,
    status: AppointmentStatus,
) {
    if let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) {
        appointment.status = status;
    }
}

pub struct AdminView {
    api: Arc<dyn BookingApi>,
    stats: Option<AdminStats>,
    appointments: Vec<AdminAppointment>,
    doctor_name: String,
    specialization: String,
    message: Option<String>,
    stats_fetch: Option<FetchTask<Result<AdminStats, ApiError>>>,
    appointments_fetch: Option<FetchTask<Result<Vec<AdminAppointment>, ApiError>>>,
}

impl AdminView {
    /// Mount the dashboard: start the stats and appointment fetches.
    /// The two fetches are not ordered relative to each other.
    pub fn mount(api: Arc<dyn BookingApi>) -> Self {
        let stats_api = Arc::clone(&api);
        let appointments_api = Arc::clone(&api);
        Self {
            api,
            stats: None,
            appointments: Vec::new(),
            doctor_name: String::new(),
            specialization: String::new(),
            message: None,
            stats_fetch: Some(FetchTask::spawn(async move { stats_api.admin_stats().await })),
            appointments_fetch: Some(FetchTask::spawn(async move {
                appointments_api.admin_appointments().await
            })),
        }
    }

    /// Resolve whichever mount fetches are still pending.
    pub async fn resolve(&mut self) {
        if let Some(task) = self.stats_fetch.take() {
            match task.join().await {
                Some(Ok(stats)) => self.stats = Some(stats),
                Some(Err(e)) => tracing::warn!("Stats fetch failed: {e}"),
                None => {}
            }
        }
        if let Some(task) = self.appointments_fetch.take() {
            match task.join().await {
                Some(Ok(list)) => self.appointments = list,
                Some(Err(e)) => tracing::warn!("Admin appointment fetch failed: {e}"),
                None => {}
            }
        }
    }

    // ── Local state ─────────────────────────────────────────

    pub fn stats(&self) -> Option<&AdminStats> {
        self.stats.as_ref()
    }

    pub fn appointments(&self) -> &[AdminAppointment] {
        &self.appointments
    }

    pub fn set_doctor_name(&mut self, value: &str) {
        self.doctor_name = value.to_string();
    }

    pub fn set_specialization(&mut self, value: &str) {
        self.specialization = value.to_string();
    }

    pub fn doctor_name(&self) -> &str {
        &self.doctor_name
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    // ── Workflow ────────────────────────────────────────────

    /// Create a doctor. Both fields are required locally before any network
    /// call. Success clears the form and re-fetches stats only; the booking
    /// view's doctor list is not touched (it re-fetches on its own mount).
    /// Failure preserves the form fields.
    pub async fn create_doctor(&mut self) {
        self.message = None;
        if self.doctor_name.is_empty() || self.specialization.is_empty() {
            self.message = Some(MSG_DOCTOR_FIELDS.to_string());
            return;
        }
        let result = self
            .api
            .create_doctor(&self.doctor_name, &self.specialization)
            .await;
        match result {
            Ok(_) => {
                self.message = Some(MSG_DOCTOR_CREATED.to_string());
                self.doctor_name.clear();
                self.specialization.clear();
                match self.api.admin_stats().await {
                    Ok(stats) => self.stats = Some(stats),
                    Err(e) => tracing::warn!("Stats refresh failed: {e}"),
                }
            }
            Err(e) => self.message = Some(e.surface(CREATE_DOCTOR_FALLBACK)),
        }
    }

    /// Drive a status transition. The dashboard offers only CONFIRMED and
    /// CANCELLED as targets; a redundant transition (appointment already in
    /// the target state) is refused locally. Only the confirmed target is
    /// applied, to that single row; the list is not re-fetched.
    pub async fn set_status(&mut self, id: i64, target: AppointmentStatus) {
        if target == AppointmentStatus::Pending {
            return;
        }
        let enabled = self
            .appointments
            .iter()
            .find(|a| a.id == id)
            .map(|a| transition_enabled(a, target))
            .unwrap_or(false);
        if !enabled {
            return;
        }
        let result = self.api.set_appointment_status(id, target).await;
        match result {
            Ok(_) => apply_status_update(&mut self.appointments, id, target),
            Err(e) => self.message = Some(e.surface(STATUS_FALLBACK)),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
