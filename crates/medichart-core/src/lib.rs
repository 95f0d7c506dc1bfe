//! # Medichart Core
//!
//! Core types shared by every Medichart service.
//!
//! This crate provides foundational types used throughout the platform:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`catalog`]: The closed permission/role vocabulary shared by all services
//!
//! Every independently deployed service (patients, appointments, doctors,
//! prescriptions, billing, records, notifications, analytics) links this
//! crate, which is what keeps permission and role identifiers bit-identical
//! across deployments: catalog drift shows up as a dependency version skew
//! at build time instead of a silent string mismatch at runtime.
//!
//! # Example
//!
//! ```ignore
//! use medichart_core::AppError;
//! use medichart_core::catalog;
//!
//! let error = AppError::forbidden("Access denied".to_string());
//! assert!(catalog::is_known_permission(catalog::PATIENT_READ));
//! ```

pub mod catalog;
pub mod errors;

// Re-export commonly used types at crate root
pub use errors::AppError;
