use axum::{
    Router, middleware,
    routing::{get, post},
};

use medichart_auth::{Operator, Policy, PolicyError};
use medichart_core::catalog;

use crate::middleware::policy::enforce;
use crate::state::AppState;

use super::controller::{cancel_appointment, create_appointment, list_appointments};

/// Appointment routes with their declared policies.
///
/// | Route | Requirement |
/// |-------|-------------|
/// | `GET /` | `appointment:read` OR `appointment:manage` |
/// | `POST /` | `appointment:create` |
/// | `POST /{id}/cancel` | authenticated; owner or `appointment:manage` (in handler) |
pub fn init_appointments_router() -> Result<Router<AppState>, PolicyError> {
    let read = Policy::permissions(
        &[catalog::APPOINTMENT_READ, catalog::APPOINTMENT_MANAGE],
        Operator::Or,
    )?;
    let create = Policy::permissions(&[catalog::APPOINTMENT_CREATE], Operator::And)?;
    let owner_or_manager = Policy::authenticated();

    Ok(Router::new()
        .merge(
            Router::new()
                .route("/", get(list_appointments))
                .route_layer(middleware::from_fn(move |req, next| {
                    enforce(read.clone(), req, next)
                })),
        )
        .merge(
            Router::new()
                .route("/", post(create_appointment))
                .route_layer(middleware::from_fn(move |req, next| {
                    enforce(create.clone(), req, next)
                })),
        )
        .merge(
            Router::new()
                .route("/{id}/cancel", post(cancel_appointment))
                .route_layer(middleware::from_fn(move |req, next| {
                    enforce(owner_or_manager.clone(), req, next)
                })),
        ))
}
