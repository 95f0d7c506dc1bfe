//! Verified caller identity.
//!
//! A [`Principal`] is built once per request from verified token claims and
//! discarded when the request ends. It is query-only: roles and permissions
//! cannot change after construction, so changing a user's entitlements
//! means issuing a new token.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claims::Claims;

/// Closed enumeration of account kinds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Patient,
    Doctor,
    Admin,
    Staff,
    Pharmacist,
    Receptionist,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserType::Patient => "patient",
            UserType::Doctor => "doctor",
            UserType::Admin => "admin",
            UserType::Staff => "staff",
            UserType::Pharmacist => "pharmacist",
            UserType::Receptionist => "receptionist",
        };
        f.write_str(name)
    }
}

/// Identity of an authenticated caller.
///
/// Constructed from verified claims; never persisted. All query methods are
/// side-effect free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: i64,
    username: String,
    email: String,
    user_type: UserType,
    roles: HashSet<String>,
    permissions: HashSet<String>,
    account_non_expired: bool,
    account_non_locked: bool,
    credentials_non_expired: bool,
    enabled: bool,
}

impl Principal {
    /// Builds a principal directly, primarily for the identity-issuing
    /// service and tests. Request handling goes through
    /// [`from_claims`](Self::from_claims).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        user_type: UserType,
        roles: impl IntoIterator<Item = String>,
        permissions: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: email.into(),
            user_type,
            roles: roles.into_iter().collect(),
            permissions: permissions.into_iter().collect(),
            account_non_expired: true,
            account_non_locked: true,
            credentials_non_expired: true,
            enabled: true,
        }
    }

    /// Marks the account disabled. Builder-style, used when minting tokens
    /// for accounts in a degraded state.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Marks the account locked.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.account_non_locked = !locked;
        self
    }

    /// Builds a principal from verified claims.
    ///
    /// Fails if the subject is not a well-formed integer user ID.
    pub fn from_claims(claims: &Claims) -> Result<Self, std::num::ParseIntError> {
        Ok(Self {
            user_id: claims.sub.parse()?,
            username: claims.username.clone(),
            email: claims.email.clone(),
            user_type: claims.user_type,
            roles: claims.roles.iter().cloned().collect(),
            permissions: claims.permissions.iter().cloned().collect(),
            account_non_expired: claims.account_non_expired,
            account_non_locked: claims.account_non_locked,
            credentials_non_expired: claims.credentials_non_expired,
            enabled: claims.enabled,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn roles(&self) -> &HashSet<String> {
        &self.roles
    }

    pub fn permissions(&self) -> &HashSet<String> {
        &self.permissions
    }

    /// Check if the caller holds a specific role
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains(name)
    }

    /// Check if the caller holds any of the specified roles
    pub fn has_any_role(&self, names: &[&str]) -> bool {
        names.iter().any(|r| self.has_role(r))
    }

    /// Check if the caller holds a specific permission
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    /// Check if the caller holds any of the specified permissions
    pub fn has_any_permission(&self, names: &[&str]) -> bool {
        names.iter().any(|p| self.has_permission(p))
    }

    /// Check if the caller holds all of the specified permissions
    pub fn has_all_permissions(&self, names: &[&str]) -> bool {
        names.iter().all(|p| self.has_permission(p))
    }

    /// Row-level ownership check: true iff the resource's recorded owner is
    /// this caller. Independent of roles and permissions.
    pub fn is_owner_of(&self, resource_owner_id: i64) -> bool {
        self.user_id == resource_owner_id
    }

    /// Usability gate: all four account-status flags must be true.
    ///
    /// Consumers must treat an unusable principal as unauthenticated no
    /// matter what roles or permissions it carries.
    pub fn is_usable(&self) -> bool {
        self.account_non_expired
            && self.account_non_locked
            && self.credentials_non_expired
            && self.enabled
    }

    /// Claim set for minting a new assertion for this principal.
    /// Timestamps are filled in by the codec.
    pub(crate) fn to_claims(&self, iat: i64, exp: i64) -> Claims {
        let mut roles: Vec<String> = self.roles.iter().cloned().collect();
        let mut permissions: Vec<String> = self.permissions.iter().cloned().collect();
        roles.sort();
        permissions.sort();

        Claims {
            sub: self.user_id.to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            user_type: self.user_type,
            roles,
            permissions,
            account_non_expired: self.account_non_expired,
            account_non_locked: self.account_non_locked,
            credentials_non_expired: self.credentials_non_expired,
            enabled: self.enabled,
            iat,
            exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> Principal {
        Principal::new(
            7,
            "drhouse",
            "house@clinic.example",
            UserType::Doctor,
            vec!["ROLE_DOCTOR".to_string()],
            vec!["patient:read".to_string(), "record:create".to_string()],
        )
    }

    #[test]
    fn test_has_role() {
        let p = doctor();
        assert!(p.has_role("ROLE_DOCTOR"));
        assert!(!p.has_role("ROLE_ADMIN"));
    }

    #[test]
    fn test_has_any_role() {
        let p = doctor();
        assert!(p.has_any_role(&["ROLE_ADMIN", "ROLE_DOCTOR"]));
        assert!(!p.has_any_role(&["ROLE_ADMIN", "ROLE_STAFF"]));
        assert!(!p.has_any_role(&[]));
    }

    #[test]
    fn test_has_permission() {
        let p = doctor();
        assert!(p.has_permission("patient:read"));
        assert!(!p.has_permission("patient:delete"));
    }

    #[test]
    fn test_has_any_permission() {
        let p = doctor();
        assert!(p.has_any_permission(&["patient:read", "patient:delete"]));
        assert!(!p.has_any_permission(&["patient:update", "patient:delete"]));
    }

    #[test]
    fn test_has_all_permissions() {
        let p = doctor();
        assert!(p.has_all_permissions(&["patient:read", "record:create"]));
        assert!(!p.has_all_permissions(&["patient:read", "patient:delete"]));
    }

    #[test]
    fn test_is_owner_of() {
        let p = doctor();
        assert!(p.is_owner_of(7));
        assert!(!p.is_owner_of(8));
        assert!(!p.is_owner_of(-7));
        assert!(!p.is_owner_of(0));
    }

    #[test]
    fn test_usability_gate() {
        assert!(doctor().is_usable());
        assert!(!doctor().with_enabled(false).is_usable());
        assert!(!doctor().with_locked(true).is_usable());
    }

    #[test]
    fn test_from_claims_round_trip() {
        let p = doctor();
        let claims = p.to_claims(100, 200);
        let rebuilt = Principal::from_claims(&claims).unwrap();
        assert_eq!(p, rebuilt);
    }

    #[test]
    fn test_from_claims_bad_subject() {
        let mut claims = doctor().to_claims(100, 200);
        claims.sub = "not-a-number".to_string();
        assert!(Principal::from_claims(&claims).is_err());
    }

    #[test]
    fn test_user_type_display() {
        assert_eq!(UserType::Pharmacist.to_string(), "pharmacist");
        assert_eq!(UserType::Admin.to_string(), "admin");
    }
}
