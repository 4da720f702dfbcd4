//! Patient booking view: doctor list, search filter, future-slot booking.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::api::{ApiError, BookingApi};
use crate::fetch::FetchTask;
use crate::models::Doctor;

pub const MSG_SELECT_TIME: &str = "Please select a date and time";
pub const MSG_FUTURE_TIME: &str = "Please choose a future date and time";
pub const MSG_BOOKED: &str = "Appointment booked successfully";
pub const BOOK_FALLBACK: &str = "Failed to book appointment";

/// Input format of the datetime picker: minute precision, local time.
pub const PICKER_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Case-insensitive substring filter over doctor name OR specialization.
/// Pure and order-preserving; an empty or whitespace-only term selects all.
pub fn filter_doctors<'a>(doctors: &'a [Doctor], term: &str) -> Vec<&'a Doctor> {
    let term = term.trim().to_lowercase();
    doctors
        .iter()
        .filter(|d| {
            term.is_empty()
                || d.name.to_lowercase().contains(&term)
                || d.specialization.to_lowercase().contains(&term)
        })
        .collect()
}

/// Local gate for a booking submission: the slot must be present, well
/// formed, and strictly in the future. `Err` carries the message to show
/// when the network call must not happen.
pub fn validate_slot(raw: &str, now: NaiveDateTime) -> Result<NaiveDateTime, &'static str> {
    if raw.is_empty() {
        return Err(MSG_SELECT_TIME);
    }
    let chosen =
        NaiveDateTime::parse_from_str(raw, PICKER_FORMAT).map_err(|_| MSG_SELECT_TIME)?;
    if chosen <= now {
        return Err(MSG_FUTURE_TIME);
    }
    Ok(chosen)
}

pub struct BookingView {
    api: Arc<dyn BookingApi>,
    doctors: Vec<Doctor>,
    search: String,
    selected_time: String,
    min_datetime: String,
    message: Option<String>,
    fetch: Option<FetchTask<Result<Vec<Doctor>, ApiError>>>,
}

impl BookingView {
    /// Mount the view: clamp the picker minimum to "now" and start the
    /// doctor fetch. The fetch is owned by this view and aborted if the
    /// view is dropped before it resolves.
    pub fn mount(api: Arc<dyn BookingApi>) -> Self {
        Self::mount_at(api, chrono::Local::now().naive_local())
    }

    /// Mount with an explicit wall clock.
    pub fn mount_at(api: Arc<dyn BookingApi>, now: NaiveDateTime) -> Self {
        let fetch_api = Arc::clone(&api);
        let fetch = FetchTask::spawn(async move { fetch_api.list_doctors().await });
        Self {
            api,
            doctors: Vec::new(),
            search: String::new(),
            selected_time: String::new(),
            min_datetime: now.format(PICKER_FORMAT).to_string(),
            message: None,
            fetch: Some(fetch),
        }
    }

    /// Resolve the pending doctor fetch, if any. A failed fetch leaves the
    /// list empty; this screen surfaces booking feedback only, so the
    /// failure goes to the log.
    pub async fn resolve(&mut self) {
        if let Some(task) = self.fetch.take() {
            match task.join().await {
                Some(Ok(doctors)) => self.doctors = doctors,
                Some(Err(e)) => tracing::warn!("Doctor list fetch failed: {e}"),
                None => {}
            }
        }
    }

    // ── Local state ─────────────────────────────────────────

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_selected_time(&mut self, raw: &str) {
        self.selected_time = raw.to_string();
    }

    pub fn selected_time(&self) -> &str {
        &self.selected_time
    }

    /// Minimum selectable slot, clamped to the mount-time wall clock.
    pub fn min_datetime(&self) -> &str {
        &self.min_datetime
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// The doctors matching the current search term, recomputed on every
    /// keystroke; no debouncing.
    pub fn visible_doctors(&self) -> Vec<&Doctor> {
        filter_doctors(&self.doctors, &self.search)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    // ── Workflow ────────────────────────────────────────────

    /// Book the selected slot with a doctor. Rejected locally, with no
    /// network call, unless the slot is strictly in the future at
    /// submission time. Acceptance only sets the success message; the new
    /// appointment is not materialized into any local list.
    pub async fn book(&mut self, doctor_id: i64) {
        self.book_at(doctor_id, chrono::Local::now().naive_local())
            .await
    }

    /// Book against an explicit wall clock.
    pub async fn book_at(&mut self, doctor_id: i64, now: NaiveDateTime) {
        if let Err(msg) = validate_slot(&self.selected_time, now) {
            self.message = Some(msg.to_string());
            return;
        }
        let result = self
            .api
            .book_appointment(doctor_id, &self.selected_time)
            .await;
        match result {
            Ok(_) => self.message = Some(MSG_BOOKED.to_string()),
            Err(e) => self.message = Some(e.surface(BOOK_FALLBACK)),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
