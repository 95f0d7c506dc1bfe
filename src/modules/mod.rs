//! Feature modules.
//!
//! Each module follows the controller/service/model/router convention. The
//! record-keeping logic here is intentionally thin; the interesting part
//! is the declared policy on every route and the ownership checks inside
//! handlers.

pub mod appointments;
pub mod patients;
