use serde::{Deserialize, Serialize};

/// Aggregate snapshot for the admin dashboard header. Fetched on dashboard
/// mount and again after a successful doctor creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_patients: i64,
    pub total_doctors: i64,
    pub total_appointments: i64,
    pub appointments_today: i64,
}
