use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use medichart_auth::jwt::AuthError;
use medichart_auth::{IdentityContext, Principal, RequestIdentity, verify_token};
use medichart_core::AppError;

use crate::state::AppState;

/// Authentication middleware: verifies the bearer assertion and binds the
/// resulting identity to the request scope.
///
/// Requests without an `Authorization` header run anonymously; the policy
/// layer of a protected route then denies them with 401. A header that is
/// present but unverifiable is always rejected here, so a bad credential
/// never falls back to anonymous access. The identity binding is dropped on
/// every exit path because it lives only inside the scoped future.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = match req.headers().get(header::AUTHORIZATION) {
        None => return Ok(next.run(req).await),
        Some(value) => value.clone(),
    };

    let token = header_value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

    let principal = verify_token(token, &state.keyring, state.auth_config.clock_skew_leeway)
        .map_err(|err| match err {
            AuthError::Signing(reason) => {
                AppError::internal_error(format!("Token verification unavailable: {reason}"))
            }
            _ => AppError::unauthorized("Invalid or expired token".to_string()),
        })?;

    // Usability gate: a disabled or locked account is unauthenticated no
    // matter what the token grants.
    if !principal.is_usable() {
        return Err(AppError::unauthorized(
            "Account is locked or disabled".to_string(),
        ));
    }

    let identity = Arc::new(RequestIdentity {
        principal,
        token: token.to_string(),
    });

    Ok(IdentityContext::scope(identity, next.run(req)).await)
}

/// Extractor that provides the authenticated caller's [`Principal`] from
/// the request scope. Rejects anonymous requests with 401.
///
/// # Example
///
/// ```ignore
/// pub async fn get_patient(
///     AuthUser(principal): AuthUser,
///     Path(id): Path<i64>,
/// ) -> Result<Json<Patient>, AppError> {
///     if principal.is_owner_of(id) {
///         // Patients may read their own record
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        IdentityContext::current_principal()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
    }
}
