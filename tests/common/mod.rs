use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use medichart::outbound::ServiceClient;
use medichart::router::init_router;
use medichart::state::AppState;
use medichart_auth::{Keyring, Principal, UserType, issue_token};
use medichart_config::{AuthConfig, CorsConfig};
use medichart_core::catalog;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// App state with a fixed test secret, zero clock-skew leeway, and a
/// notifications peer pointing at a dead port so dispatch fails fast.
pub fn test_state() -> AppState {
    let auth_config = AuthConfig {
        secret: TEST_SECRET.to_string(),
        previous_secrets: vec![],
        token_ttl: 3600,
        clock_skew_leeway: 0,
    };
    let keyring = Keyring::new(&auth_config.secret, &auth_config.previous_secrets).unwrap();

    AppState {
        auth_config,
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        keyring: Arc::new(keyring),
        patients: Default::default(),
        appointments: Default::default(),
        notifications: ServiceClient::new("notifications", "http://127.0.0.1:9"),
    }
}

pub fn test_app(state: &AppState) -> Router {
    init_router(state.clone()).unwrap()
}

pub fn admin() -> Principal {
    Principal::new(
        1,
        "admin",
        "admin@medichart.example",
        UserType::Admin,
        vec![catalog::ROLE_ADMIN.to_string()],
        catalog::ALL_PERMISSIONS.iter().map(|p| p.to_string()),
    )
}

pub fn staff_with(permissions: &[&str]) -> Principal {
    Principal::new(
        2,
        "frontdesk",
        "frontdesk@medichart.example",
        UserType::Staff,
        vec![catalog::ROLE_STAFF.to_string()],
        permissions.iter().map(|p| p.to_string()),
    )
}

pub fn patient(user_id: i64) -> Principal {
    Principal::new(
        user_id,
        format!("patient{user_id}"),
        format!("patient{user_id}@example.com"),
        UserType::Patient,
        vec![catalog::ROLE_PATIENT.to_string()],
        vec![],
    )
}

pub fn token_for(state: &AppState, principal: &Principal) -> String {
    issue_token(principal, &state.keyring, state.auth_config.token_ttl).unwrap()
}

pub fn expired_token_for(state: &AppState, principal: &Principal) -> String {
    issue_token(principal, &state.keyring, -10).unwrap()
}

pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
