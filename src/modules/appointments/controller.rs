use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::warn;

use medichart_core::{AppError, catalog};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::model::{Appointment, CreateAppointmentRequest};
use super::service::dispatch_booking_notification;

pub async fn list_appointments(State(state): State<AppState>) -> Json<Vec<Appointment>> {
    Json(state.appointments.list().await)
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> (StatusCode, Json<Appointment>) {
    let appointment = state.appointments.create(request).await;

    // Best-effort dispatch; the booking stands even if the notifications
    // service is unreachable. The caller's assertion travels with the call.
    if let Err(err) = dispatch_booking_notification(&state.notifications, &appointment).await {
        warn!(
            appointment_id = appointment.id,
            error = %err,
            "failed to dispatch booking notification"
        );
    }

    (StatusCode::CREATED, Json(appointment))
}

/// Cancel an appointment.
///
/// The booked patient may cancel their own appointment; anyone else needs
/// `appointment:manage`.
pub async fn cancel_appointment(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .appointments
        .get(id)
        .await
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Appointment {id} not found")))?;

    if !principal.is_owner_of(appointment.patient_user_id)
        && !principal.has_permission(catalog::APPOINTMENT_MANAGE)
    {
        return Err(AppError::forbidden(
            "Access denied. Not the booking owner.".to_string(),
        ));
    }

    state
        .appointments
        .cancel(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Appointment {id} not found")))
}
