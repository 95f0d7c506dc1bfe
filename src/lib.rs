//! # Medichart Service
//!
//! One deployed service of the Medichart healthcare platform, wired through
//! the shared distributed-authorization core. The platform is a set of
//! independently deployed services (patients, appointments, doctors,
//! prescriptions, billing, medical records, notifications, analytics); each
//! links the same `medichart-core`, `medichart-config`, and `medichart-auth`
//! crates and enforces policy locally, with no synchronous call back to a
//! central authority per request.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── logging.rs        # Request logging middleware
//! ├── middleware/       # Authentication + policy enforcement
//! ├── modules/          # Feature modules
//! │   ├── patients/     # Patient registry
//! │   └── appointments/ # Appointment booking
//! ├── outbound.rs       # Identity-forwarding client for peer services
//! ├── router.rs         # Route registration with declared policies
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic and stores
//! - `model.rs`: Data models and DTOs
//! - `router.rs`: Axum router configuration with declared policies
//!
//! ## Request flow
//!
//! 1. `Authorization: Bearer <token>` verified by the authentication
//!    middleware against the keyring (signature, expiry with leeway)
//! 2. A `Principal` is built from the claims and bound to the request scope
//! 3. The route's declared `Policy` (roles, AND/OR permissions) is
//!    evaluated; denials are 401/403
//! 4. Handlers needing row-level access use `Principal::is_owner_of`
//! 5. Outbound calls to peer services re-attach the caller's raw assertion
//!
//! ## Environment Variables
//!
//! ```bash
//! AUTH_TOKEN_SECRET=your-secure-secret-key
//! AUTH_PREVIOUS_SECRETS=older-secret-still-trusted
//! AUTH_TOKEN_TTL=3600
//! AUTH_CLOCK_SKEW_LEEWAY=30
//! NOTIFICATIONS_SERVICE_URL=http://localhost:3007
//! ALLOWED_ORIGINS=http://localhost:3000
//! ```

pub mod logging;
pub mod middleware;
pub mod modules;
pub mod outbound;
pub mod router;
pub mod state;

// Re-export workspace crates for convenience
pub use medichart_auth;
pub use medichart_config;
pub use medichart_core;
