use serde::{Deserialize, Serialize};

/// A bookable doctor. Read-only from the client's perspective except for
/// creation through the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
}
