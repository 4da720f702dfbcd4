//! Patient appointment history: fetch-then-render with a loading flag.

use std::sync::Arc;

use crate::api::{ApiError, BookingApi};
use crate::fetch::FetchTask;
use crate::models::Appointment;

pub struct HistoryView {
    appointments: Vec<Appointment>,
    loading: bool,
    fetch: Option<FetchTask<Result<Vec<Appointment>, ApiError>>>,
}

impl HistoryView {
    /// Mount the view and start the history fetch.
    pub fn mount(api: Arc<dyn BookingApi>) -> Self {
        let fetch = FetchTask::spawn(async move { api.my_appointments().await });
        Self {
            appointments: Vec::new(),
            loading: true,
            fetch: Some(fetch),
        }
    }

    /// Resolve the pending fetch. The loading flag clears regardless of
    /// outcome; this screen has no inline error surface, so a failed fetch
    /// leaves the list empty and only reaches the log.
    pub async fn resolve(&mut self) {
        if let Some(task) = self.fetch.take() {
            match task.join().await {
                Some(Ok(list)) => self.appointments = list,
                Some(Err(e)) => tracing::warn!("Appointment history fetch failed: {e}"),
                None => {}
            }
        }
        self.loading = false;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}
