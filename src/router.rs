use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::middleware::auth::authenticate;
use crate::modules::appointments::router::init_appointments_router;
use crate::modules::patients::router::init_patients_router;
use crate::state::AppState;

/// Builds the application router.
///
/// Every `/api` route runs behind the authentication middleware; each
/// protected route additionally carries the policy declared in its module
/// router. Policy construction validates identifiers against the catalog,
/// so a misdeclared requirement aborts startup here instead of denying
/// forever at runtime.
pub fn init_router(state: AppState) -> anyhow::Result<Router> {
    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            Router::new()
                .nest("/patients", init_patients_router()?)
                .nest("/appointments", init_appointments_router()?)
                .layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware));

    Ok(router)
}
