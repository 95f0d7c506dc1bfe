//! Claim structure for Medichart identity assertions.
//!
//! The assertion is self-contained: everything a service needs to make an
//! authorization decision is in the claim set, so no service has to call
//! back to the identity service per request. The signature covers every
//! claim; mutating any field invalidates the token.

use serde::{Deserialize, Serialize};

use crate::principal::UserType;

/// Claims embedded in an identity assertion.
///
/// # Fields
///
/// - `sub`: User ID (subject), stringified integer
/// - `username`: Login name
/// - `email`: User's email address
/// - `user_type`: Kind of account (patient, doctor, admin, ...)
/// - `roles`: Role names granted to the user
/// - `permissions`: Permission identifiers granted to the user
/// - `account_non_expired` / `account_non_locked` /
///   `credentials_non_expired` / `enabled`: account-status flags; all four
///   must be true for the identity to be usable
/// - `iat` / `exp`: Issued-at and expiry (Unix timestamps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Login name
    pub username: String,
    /// User's email address
    pub email: String,
    /// Kind of account
    pub user_type: UserType,
    /// Role names granted to the user
    pub roles: Vec<String>,
    /// Permission identifiers granted to the user
    pub permissions: Vec<String>,
    /// Account has not passed its expiry date
    pub account_non_expired: bool,
    /// Account is not administratively locked
    pub account_non_locked: bool,
    /// Credentials have not expired
    pub credentials_non_expired: bool,
    /// Account is enabled
    pub enabled: bool,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims {
            sub: "42".to_string(),
            username: "drhouse".to_string(),
            email: "house@clinic.example".to_string(),
            user_type: UserType::Doctor,
            roles: vec!["ROLE_DOCTOR".to_string()],
            permissions: vec!["patient:read".to_string()],
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
            enabled: true,
            iat: 1234567800,
            exp: 1234567890,
        }
    }

    #[test]
    fn test_claims_serialize() {
        let serialized = serde_json::to_string(&sample_claims()).unwrap();
        assert!(serialized.contains(r#""sub":"42""#));
        assert!(serialized.contains(r#""user_type":"doctor""#));
        assert!(serialized.contains(r#""enabled":true"#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{
            "sub":"7","username":"jdoe","email":"jdoe@example.com",
            "user_type":"patient","roles":["ROLE_PATIENT"],"permissions":[],
            "account_non_expired":true,"account_non_locked":true,
            "credentials_non_expired":true,"enabled":false,
            "iat":9999999900,"exp":9999999999
        }"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_type, UserType::Patient);
        assert!(!claims.enabled);
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_claims_clone() {
        let claims = sample_claims();
        let cloned = claims.clone();
        assert_eq!(claims.sub, cloned.sub);
        assert_eq!(claims.roles, cloned.roles);
    }
}
