use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use medichart_auth::{Operator, Policy, PolicyError};
use medichart_core::catalog;

use crate::middleware::policy::enforce;
use crate::state::AppState;

use super::controller::{
    create_patient, delete_patient, get_patient, list_patients, update_patient,
};

/// Patient routes with their declared policies.
///
/// | Route | Requirement |
/// |-------|-------------|
/// | `GET /` | clinical role AND `patient:read` |
/// | `POST /` | `patient:create` |
/// | `GET /{id}` | authenticated; owner or `patient:read` (in handler) |
/// | `PUT /{id}` | `patient:read` AND `patient:update` |
/// | `DELETE /{id}` | `ROLE_ADMIN` |
pub fn init_patients_router() -> Result<Router<AppState>, PolicyError> {
    let read = Policy::roles(&[
        catalog::ROLE_ADMIN,
        catalog::ROLE_DOCTOR,
        catalog::ROLE_STAFF,
        catalog::ROLE_RECEPTIONIST,
    ])?
    .with_permissions(&[catalog::PATIENT_READ], Operator::And)?;
    let create = Policy::permissions(&[catalog::PATIENT_CREATE], Operator::And)?;
    let update = Policy::permissions(
        &[catalog::PATIENT_READ, catalog::PATIENT_UPDATE],
        Operator::And,
    )?;
    let admin = Policy::roles(&[catalog::ROLE_ADMIN])?;
    let owner_or_reader = Policy::authenticated();

    Ok(Router::new()
        .merge(Router::new().route("/", get(list_patients)).route_layer(
            middleware::from_fn(move |req, next| enforce(read.clone(), req, next)),
        ))
        .merge(Router::new().route("/", post(create_patient)).route_layer(
            middleware::from_fn(move |req, next| enforce(create.clone(), req, next)),
        ))
        .merge(Router::new().route("/{id}", get(get_patient)).route_layer(
            middleware::from_fn(move |req, next| enforce(owner_or_reader.clone(), req, next)),
        ))
        .merge(Router::new().route("/{id}", put(update_patient)).route_layer(
            middleware::from_fn(move |req, next| enforce(update.clone(), req, next)),
        ))
        .merge(
            Router::new()
                .route("/{id}", delete(delete_patient))
                .route_layer(middleware::from_fn(move |req, next| {
                    enforce(admin.clone(), req, next)
                })),
        ))
}
