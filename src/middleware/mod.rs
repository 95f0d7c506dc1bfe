//! Middleware for authentication and policy enforcement.
//!
//! - [`auth`]: Verifies the bearer assertion, builds the [`Principal`] and
//!   binds it to the request scope; also the `AuthUser` extractor
//! - [`policy`]: Evaluates a route's declared [`Policy`] against the
//!   current principal and short-circuits denials
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::authenticate`] verifies the token and scopes the identity
//! 3. The route's policy layer checks declared role/permission requirements
//! 4. Handler executes if all checks pass
//!
//! A missing header leaves the request anonymous; routes with a policy then
//! deny with 401. A present-but-invalid header is always 401, so a broken
//! credential can never downgrade to anonymous access.
//!
//! [`Principal`]: medichart_auth::Principal
//! [`Policy`]: medichart_auth::Policy

pub mod auth;
pub mod policy;
