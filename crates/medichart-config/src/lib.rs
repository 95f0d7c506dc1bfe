//! # Medichart Config
//!
//! Configuration types for Medichart services.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`auth`]: Token signing/verification configuration (secrets, TTL, leeway)
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`services`]: Base URLs of peer services for identity forwarding
//!
//! # Example
//!
//! ```ignore
//! use medichart_config::{AuthConfig, CorsConfig, ServicesConfig};
//!
//! // Load all configs from environment
//! let auth_config = AuthConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let services_config = ServicesConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod services;

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use services::ServicesConfig;
