use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use medichart_core::{AppError, catalog};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::model::{CreatePatientRequest, Patient, UpdatePatientRequest};

pub async fn list_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    Json(state.patients.list().await)
}

pub async fn create_patient(
    State(state): State<AppState>,
    Json(request): Json<CreatePatientRequest>,
) -> (StatusCode, Json<Patient>) {
    let patient = state.patients.create(request).await;
    (StatusCode::CREATED, Json(patient))
}

/// Read a single patient entry.
///
/// Ownership escape hatch: the owning patient may read their own entry
/// without the blanket `patient:read` permission, so the ownership check
/// runs before the permission check. The route itself only requires an
/// authenticated caller.
pub async fn get_patient(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, AppError> {
    let patient = state
        .patients
        .get(id)
        .await
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Patient {id} not found")))?;

    if !principal.is_owner_of(patient.user_id) && !principal.has_permission(catalog::PATIENT_READ)
    {
        return Err(AppError::forbidden(
            "Access denied. Not the record owner.".to_string(),
        ));
    }

    Ok(Json(patient))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    state
        .patients
        .update(id, request)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Patient {id} not found")))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.patients.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(anyhow::anyhow!(
            "Patient {id} not found"
        )))
    }
}
