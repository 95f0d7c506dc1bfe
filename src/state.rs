use std::sync::Arc;

use anyhow::Context;

use medichart_auth::Keyring;
use medichart_config::{AuthConfig, CorsConfig, ServicesConfig};

use crate::modules::appointments::service::AppointmentStore;
use crate::modules::patients::service::PatientStore;
use crate::outbound::ServiceClient;

#[derive(Clone)]
pub struct AppState {
    pub auth_config: AuthConfig,
    pub cors_config: CorsConfig,
    pub keyring: Arc<Keyring>,
    pub patients: PatientStore,
    pub appointments: AppointmentStore,
    pub notifications: ServiceClient,
}

pub fn init_app_state() -> anyhow::Result<AppState> {
    let auth_config = AuthConfig::from_env();
    let services_config = ServicesConfig::from_env();

    // Missing or weak key material is fatal at startup, never per-request.
    let keyring = Keyring::new(&auth_config.secret, &auth_config.previous_secrets)
        .context("failed to initialize token keyring")?;

    Ok(AppState {
        notifications: ServiceClient::new("notifications", &services_config.notifications_url),
        cors_config: CorsConfig::from_env(),
        keyring: Arc::new(keyring),
        patients: PatientStore::default(),
        appointments: AppointmentStore::default(),
        auth_config,
    })
}
