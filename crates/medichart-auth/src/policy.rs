//! Declarative authorization requirements for protected operations.
//!
//! A [`Policy`] names the roles and/or permissions an operation demands.
//! Policies are declared once, next to route registration, and evaluated
//! against the current [`Principal`] by the enforcement middleware, so there
//! is no reflection and no per-handler ad hoc checking. Constructors
//! validate every identifier against the shared catalog, so a typo fails at
//! service startup instead of silently denying forever.
//!
//! # Example
//!
//! ```ignore
//! use medichart_auth::{Operator, Policy};
//! use medichart_core::catalog;
//!
//! let read_or_manage = Policy::permissions(
//!     &[catalog::APPOINTMENT_READ, catalog::APPOINTMENT_MANAGE],
//!     Operator::Or,
//! )?;
//! read_or_manage.evaluate(Some(&principal))?;
//! ```

use medichart_core::catalog;
use thiserror::Error;

use crate::principal::Principal;

/// Boolean combinator over a permission requirement's named permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Every named permission must be present.
    And,
    /// At least one named permission must be present.
    Or,
}

/// Outcome of a failed policy evaluation or an invalid declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// No usable principal is bound to the request.
    #[error("authentication required")]
    Unauthenticated,
    /// The principal is authenticated but does not satisfy the policy.
    #[error("caller does not satisfy {requirement}")]
    Forbidden { requirement: String },
    /// The policy itself is invalid (empty or off-catalog identifiers).
    /// Never reported to callers as a 401/403.
    #[error("policy misconfiguration: {0}")]
    Misconfigured(String),
}

/// A non-empty set of permission identifiers plus an AND/OR combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequirement {
    names: Vec<String>,
    operator: Operator,
}

impl PermissionRequirement {
    pub fn new(names: &[&str], operator: Operator) -> Result<Self, PolicyError> {
        if names.is_empty() {
            return Err(PolicyError::Misconfigured(
                "permission requirement must name at least one permission".to_string(),
            ));
        }
        for name in names {
            if !catalog::is_known_permission(name) {
                return Err(PolicyError::Misconfigured(format!(
                    "unknown permission identifier: {name}"
                )));
            }
        }
        Ok(Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            operator,
        })
    }

    fn satisfied_by(&self, principal: &Principal) -> bool {
        match self.operator {
            Operator::And => self.names.iter().all(|p| principal.has_permission(p)),
            Operator::Or => self.names.iter().any(|p| principal.has_permission(p)),
        }
    }

    fn describe(&self) -> String {
        let joiner = match self.operator {
            Operator::And => " AND ",
            Operator::Or => " OR ",
        };
        format!("permissions [{}]", self.names.join(joiner))
    }
}

/// A non-empty set of role names; satisfied by holding any one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRequirement {
    names: Vec<String>,
}

impl RoleRequirement {
    pub fn new(names: &[&str]) -> Result<Self, PolicyError> {
        if names.is_empty() {
            return Err(PolicyError::Misconfigured(
                "role requirement must name at least one role".to_string(),
            ));
        }
        for name in names {
            if !catalog::is_known_role(name) {
                return Err(PolicyError::Misconfigured(format!(
                    "unknown role name: {name}"
                )));
            }
        }
        Ok(Self {
            names: names.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn satisfied_by(&self, principal: &Principal) -> bool {
        self.names.iter().any(|r| principal.has_role(r))
    }

    fn describe(&self) -> String {
        format!("any role of [{}]", self.names.join(", "))
    }
}

/// The declared requirements of one protected operation.
///
/// Role requirement (if any) is evaluated before the permission requirement;
/// either may independently deny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    roles: Option<RoleRequirement>,
    permissions: Option<PermissionRequirement>,
}

impl Policy {
    /// Requires a usable authenticated principal and nothing more.
    pub fn authenticated() -> Self {
        Self {
            roles: None,
            permissions: None,
        }
    }

    /// Requires any one of the named roles.
    pub fn roles(names: &[&str]) -> Result<Self, PolicyError> {
        Ok(Self {
            roles: Some(RoleRequirement::new(names)?),
            permissions: None,
        })
    }

    /// Requires the named permissions combined with `operator`.
    pub fn permissions(names: &[&str], operator: Operator) -> Result<Self, PolicyError> {
        Ok(Self {
            roles: None,
            permissions: Some(PermissionRequirement::new(names, operator)?),
        })
    }

    /// Adds a role requirement to an existing policy.
    pub fn with_roles(mut self, names: &[&str]) -> Result<Self, PolicyError> {
        self.roles = Some(RoleRequirement::new(names)?);
        Ok(self)
    }

    /// Adds a permission requirement to an existing policy.
    pub fn with_permissions(
        mut self,
        names: &[&str],
        operator: Operator,
    ) -> Result<Self, PolicyError> {
        self.permissions = Some(PermissionRequirement::new(names, operator)?);
        Ok(self)
    }

    /// Evaluates this policy against the current principal.
    ///
    /// An absent or unusable principal is unauthenticated regardless of its
    /// role/permission content. Ownership checks are deliberately not part
    /// of policy evaluation; handlers use [`Principal::is_owner_of`]
    /// directly.
    pub fn evaluate(&self, principal: Option<&Principal>) -> Result<(), PolicyError> {
        let principal = match principal {
            Some(p) if p.is_usable() => p,
            _ => return Err(PolicyError::Unauthenticated),
        };

        if let Some(roles) = &self.roles
            && !roles.satisfied_by(principal)
        {
            return Err(PolicyError::Forbidden {
                requirement: roles.describe(),
            });
        }

        if let Some(permissions) = &self.permissions
            && !permissions.satisfied_by(principal)
        {
            return Err(PolicyError::Forbidden {
                requirement: permissions.describe(),
            });
        }

        Ok(())
    }
}
