use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_user_id: i64,
    pub doctor_user_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_user_id: i64,
    pub doctor_user_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
}

/// Payload forwarded to the notifications service when an appointment is
/// booked. The notifications service enforces its own policy against the
/// forwarded assertion.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentNotification {
    pub recipient_user_id: i64,
    pub message: String,
}
