//! Permission and role catalog for the Medichart platform.
//!
//! This module is the single source of truth for permission identifiers and
//! role names. Every service declares its policy requirements against these
//! constants; string literals scattered per service are exactly the drift
//! hazard this catalog exists to remove. The catalog is closed: policy
//! constructors reject identifiers that are not listed here.
//!
//! # Example
//!
//! ```ignore
//! use medichart_core::catalog;
//!
//! if principal.has_permission(catalog::PATIENT_READ) {
//!     // Read the patient record
//! }
//! ```

/// Catalog revision. Bump whenever an identifier is added or retired so
/// deployments can assert they agree on the vocabulary.
pub const CATALOG_VERSION: u32 = 1;

// =============================================================================
// Patient permissions
// =============================================================================

/// Permission to register patients
pub const PATIENT_CREATE: &str = "patient:create";
/// Permission to read patient records
pub const PATIENT_READ: &str = "patient:read";
/// Permission to update patient records
pub const PATIENT_UPDATE: &str = "patient:update";
/// Permission to delete patient records
pub const PATIENT_DELETE: &str = "patient:delete";

// =============================================================================
// Appointment permissions
// =============================================================================

/// Permission to book appointments
pub const APPOINTMENT_CREATE: &str = "appointment:create";
/// Permission to read appointments
pub const APPOINTMENT_READ: &str = "appointment:read";
/// Permission to update appointments
pub const APPOINTMENT_UPDATE: &str = "appointment:update";
/// Permission to cancel appointments
pub const APPOINTMENT_CANCEL: &str = "appointment:cancel";
/// Permission to manage all appointments across the practice
pub const APPOINTMENT_MANAGE: &str = "appointment:manage";

// =============================================================================
// Medical record permissions
// =============================================================================

/// Permission to create medical records
pub const RECORD_CREATE: &str = "record:create";
/// Permission to read medical records
pub const RECORD_READ: &str = "record:read";
/// Permission to update medical records
pub const RECORD_UPDATE: &str = "record:update";

// =============================================================================
// Prescription permissions
// =============================================================================

/// Permission to issue prescriptions
pub const PRESCRIPTION_CREATE: &str = "prescription:create";
/// Permission to read prescriptions
pub const PRESCRIPTION_READ: &str = "prescription:read";
/// Permission to dispense prescriptions
pub const PRESCRIPTION_DISPENSE: &str = "prescription:dispense";

// =============================================================================
// Billing permissions
// =============================================================================

/// Permission to create invoices
pub const BILLING_CREATE: &str = "billing:create";
/// Permission to read invoices
pub const BILLING_READ: &str = "billing:read";

// =============================================================================
// Notification permissions
// =============================================================================

/// Permission to send notifications
pub const NOTIFICATION_SEND: &str = "notification:send";

// =============================================================================
// Report permissions
// =============================================================================

/// Permission to view analytics reports
pub const REPORT_VIEW: &str = "report:view";
/// Permission to export analytics reports
pub const REPORT_EXPORT: &str = "report:export";

// =============================================================================
// Roles
// =============================================================================

/// Platform administrators
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
/// Medical doctors
pub const ROLE_DOCTOR: &str = "ROLE_DOCTOR";
/// Patients
pub const ROLE_PATIENT: &str = "ROLE_PATIENT";
/// Clinical and administrative staff
pub const ROLE_STAFF: &str = "ROLE_STAFF";
/// Pharmacists
pub const ROLE_PHARMACIST: &str = "ROLE_PHARMACIST";
/// Front-desk receptionists
pub const ROLE_RECEPTIONIST: &str = "ROLE_RECEPTIONIST";

/// Every permission identifier in the catalog.
pub const ALL_PERMISSIONS: &[&str] = &[
    PATIENT_CREATE,
    PATIENT_READ,
    PATIENT_UPDATE,
    PATIENT_DELETE,
    APPOINTMENT_CREATE,
    APPOINTMENT_READ,
    APPOINTMENT_UPDATE,
    APPOINTMENT_CANCEL,
    APPOINTMENT_MANAGE,
    RECORD_CREATE,
    RECORD_READ,
    RECORD_UPDATE,
    PRESCRIPTION_CREATE,
    PRESCRIPTION_READ,
    PRESCRIPTION_DISPENSE,
    BILLING_CREATE,
    BILLING_READ,
    NOTIFICATION_SEND,
    REPORT_VIEW,
    REPORT_EXPORT,
];

/// Every role name in the catalog.
pub const ALL_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_DOCTOR,
    ROLE_PATIENT,
    ROLE_STAFF,
    ROLE_PHARMACIST,
    ROLE_RECEPTIONIST,
];

/// Returns true if `name` is a permission identifier in the catalog.
pub fn is_known_permission(name: &str) -> bool {
    ALL_PERMISSIONS.contains(&name)
}

/// Returns true if `name` is a role name in the catalog.
pub fn is_known_role(name: &str) -> bool {
    ALL_ROLES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_permission() {
        assert!(is_known_permission(PATIENT_READ));
        assert!(is_known_permission(PRESCRIPTION_DISPENSE));
        assert!(!is_known_permission("patient:frobnicate"));
        assert!(!is_known_permission(""));
    }

    #[test]
    fn test_known_role() {
        assert!(is_known_role(ROLE_ADMIN));
        assert!(is_known_role(ROLE_RECEPTIONIST));
        assert!(!is_known_role("ROLE_WIZARD"));
    }

    #[test]
    fn test_roles_are_not_permissions() {
        for role in ALL_ROLES {
            assert!(!is_known_permission(role));
        }
    }

    #[test]
    fn test_no_duplicate_identifiers() {
        let permissions: HashSet<_> = ALL_PERMISSIONS.iter().collect();
        assert_eq!(permissions.len(), ALL_PERMISSIONS.len());

        let roles: HashSet<_> = ALL_ROLES.iter().collect();
        assert_eq!(roles.len(), ALL_ROLES.len());
    }

    #[test]
    fn test_permission_format() {
        for permission in ALL_PERMISSIONS {
            let mut parts = permission.split(':');
            assert!(parts.next().is_some_and(|p| !p.is_empty()));
            assert!(parts.next().is_some_and(|p| !p.is_empty()));
            assert!(parts.next().is_none(), "{permission} has extra segments");
        }
    }
}
