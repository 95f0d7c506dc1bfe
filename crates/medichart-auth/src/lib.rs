//! # Medichart Auth
//!
//! The distributed authorization core shared by every Medichart service.
//!
//! Each service verifies inbound identity assertions locally, with no call
//! back to the identity service, and forwards the same assertion unchanged
//! on any outbound service-to-service call. This crate provides:
//!
//! - [`claims`]: The signed claim set carried by identity assertions
//! - [`jwt`]: Token issuing and verification (the token codec)
//! - [`keys`]: The keyring, with zero-downtime key rotation
//! - [`principal`]: The verified caller identity and its query API
//! - [`context`]: The request-scoped identity context
//! - [`policy`]: Declarative role/permission requirements with AND/OR
//!   combinators
//!
//! # Request flow
//!
//! 1. Inbound request carries `Authorization: Bearer <token>`
//! 2. [`jwt::verify_token`] checks the signature and expiry against every
//!    trusted key and builds a [`Principal`] from the claims
//! 3. The principal is bound for the request via [`IdentityContext::scope`]
//! 4. Route policies evaluate against the current principal
//! 5. Outbound calls re-attach the raw token from the context
//!
//! # Example
//!
//! ```ignore
//! use medichart_auth::{Keyring, issue_token, verify_token};
//!
//! let keyring = Keyring::new(&config.secret, &config.previous_secrets)?;
//! let token = issue_token(&principal, &keyring, config.token_ttl)?;
//! let verified = verify_token(&token, &keyring, config.clock_skew_leeway)?;
//! ```

pub mod claims;
pub mod context;
pub mod jwt;
pub mod keys;
pub mod policy;
pub mod principal;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use context::{IdentityContext, RequestIdentity};
pub use jwt::{AuthError, issue_token, verify_token};
pub use keys::Keyring;
pub use policy::{Operator, PermissionRequirement, Policy, PolicyError, RoleRequirement};
pub use principal::{Principal, UserType};
