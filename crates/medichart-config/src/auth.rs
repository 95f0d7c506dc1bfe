use std::env;

/// Token signing and verification settings, shared by every service.
///
/// `secret` is the current signing key. `previous_secrets` are still trusted
/// for verification so tokens minted before a rotation keep working until
/// they expire; signing never uses them.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret: String,
    pub previous_secrets: Vec<String>,
    /// Lifetime of newly minted tokens, in seconds. Only the identity-issuing
    /// service mints; verifying services carry this so their test fixtures
    /// and any future issuing surface agree on the lifetime.
    pub token_ttl: i64,
    pub clock_skew_leeway: u64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("AUTH_TOKEN_SECRET")
                .unwrap_or_else(|_| "medichart-dev-secret-change-in-production".to_string()),
            previous_secrets: env::var("AUTH_PREVIOUS_SECRETS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            token_ttl: env::var("AUTH_TOKEN_TTL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            clock_skew_leeway: env::var("AUTH_CLOCK_SKEW_LEEWAY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30), // seconds
        }
    }
}
