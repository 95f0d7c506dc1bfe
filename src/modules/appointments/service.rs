use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use crate::outbound::{ForwardError, ServiceClient};

use super::model::{
    Appointment, AppointmentNotification, AppointmentStatus, CreateAppointmentRequest,
};

/// In-memory appointment book. Conflict rules live in the appointments
/// service proper and are out of scope here.
#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    entries: Arc<RwLock<HashMap<i64, Appointment>>>,
    next_id: Arc<AtomicI64>,
}

impl AppointmentStore {
    pub async fn create(&self, request: CreateAppointmentRequest) -> Appointment {
        let appointment = Appointment {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            patient_user_id: request.patient_user_id,
            doctor_user_id: request.doctor_user_id,
            scheduled_at: request.scheduled_at,
            reason: request.reason,
            status: AppointmentStatus::Scheduled,
        };
        self.entries
            .write()
            .await
            .insert(appointment.id, appointment.clone());
        appointment
    }

    pub async fn list(&self) -> Vec<Appointment> {
        let mut appointments: Vec<Appointment> =
            self.entries.read().await.values().cloned().collect();
        appointments.sort_by_key(|a| a.id);
        appointments
    }

    pub async fn get(&self, id: i64) -> Option<Appointment> {
        self.entries.read().await.get(&id).cloned()
    }

    pub async fn cancel(&self, id: i64) -> Option<Appointment> {
        let mut entries = self.entries.write().await;
        let appointment = entries.get_mut(&id)?;
        appointment.status = AppointmentStatus::Cancelled;
        Some(appointment.clone())
    }
}

/// Tells the notifications service about a new booking, forwarding the
/// caller's assertion so it can enforce `notification:send` on its side.
pub async fn dispatch_booking_notification(
    notifications: &ServiceClient,
    appointment: &Appointment,
) -> Result<(), ForwardError> {
    let notification = AppointmentNotification {
        recipient_user_id: appointment.patient_user_id,
        message: format!(
            "Appointment {} scheduled for {}",
            appointment.id, appointment.scheduled_at
        ),
    };

    notifications
        .post_json::<AppointmentNotification, serde_json::Value>(
            "/api/notifications",
            &notification,
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(patient_user_id: i64) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            patient_user_id,
            doctor_user_id: 7,
            scheduled_at: Utc::now(),
            reason: "Checkup".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_cancel() {
        let store = AppointmentStore::default();
        let booked = store.create(request(100)).await;
        assert_eq!(booked.status, AppointmentStatus::Scheduled);

        let cancelled = store.cancel(booked.id).await.unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert!(store.cancel(9999).await.is_none());
    }
}
