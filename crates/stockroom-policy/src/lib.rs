//! Stockroom Policy Enforcement
//!
//! Every catalog and worker-management operation is checked here before it
//! touches state. Decisions depend only on the active session's role; there is
//! no external policy engine and no per-object rule.

pub mod error;
pub mod request;
pub mod role;
pub mod validator;

pub use error::{PolicyError, PolicyErrorKind};
pub use request::{AccessRequest, Operation};
pub use role::RolePermissions;
pub use validator::AccessValidator;
