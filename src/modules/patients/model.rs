use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient registry entry.
///
/// `user_id` is the owning account: the ownership escape hatch compares it
/// against the caller's identity, so a patient can read their own entry
/// without holding a blanket `patient:read` permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientRequest {
    pub user_id: i64,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatientRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}
