use std::env;

/// Base URLs of the peer services this deployment calls.
///
/// Deployment-time contract: each entry must point at a service that links
/// the same catalog version, since the forwarded identity assertion is
/// verified independently on the other side.
#[derive(Clone, Debug)]
pub struct ServicesConfig {
    pub notifications_url: String,
}

impl ServicesConfig {
    pub fn from_env() -> Self {
        Self {
            notifications_url: env::var("NOTIFICATIONS_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3007".to_string()),
        }
    }
}
