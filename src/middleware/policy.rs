//! Policy enforcement middleware.
//!
//! Each protected route declares its [`Policy`] at registration time in the
//! router; this middleware evaluates it against the current principal and
//! short-circuits denials before the handler runs. The router is the single
//! registration table mapping operation to requirement, so an unguarded route
//! is visible as a route without a policy layer in one file.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::warn;

use medichart_auth::{IdentityContext, Policy, PolicyError};
use medichart_core::AppError;

/// Evaluates `policy` against the current request identity.
///
/// # Usage
///
/// ```ignore
/// let read = Policy::permissions(&[catalog::PATIENT_READ], Operator::And)?;
/// Router::new().route(
///     "/",
///     get(list_patients).layer(middleware::from_fn(move |req, next| {
///         enforce(read.clone(), req, next)
///     })),
/// )
/// ```
pub async fn enforce(policy: Policy, req: Request, next: Next) -> Result<Response, AppError> {
    let principal = IdentityContext::current_principal();

    match policy.evaluate(principal.as_ref()) {
        Ok(()) => Ok(next.run(req).await),
        Err(PolicyError::Unauthenticated) => {
            Err(AppError::unauthorized("Authentication required".to_string()))
        }
        Err(PolicyError::Forbidden { requirement }) => {
            // Denials are recorded with the offending identity for audit.
            if let Some(p) = &principal {
                warn!(
                    user_id = p.user_id(),
                    username = p.username(),
                    path = %req.uri().path(),
                    requirement = %requirement,
                    granted_roles = ?p.roles(),
                    granted_permissions = ?p.permissions(),
                    "authorization denied"
                );
            }
            Err(AppError::forbidden(
                "Access denied. Missing required role or permission.".to_string(),
            ))
        }
        Err(PolicyError::Misconfigured(reason)) => Err(AppError::internal_error(format!(
            "authorization policy misconfiguration: {reason}"
        ))),
    }
}
