//! Policy error types.
//!
//! This module defines the error returned when an access check fails,
//! organized by the reason the request was refused.

use std::fmt;
use stockroom_core::Role;

use crate::request::Operation;

/// Error type for access check failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyError {
    /// The kind of policy violation.
    pub kind: PolicyErrorKind,
    /// The operation that was refused.
    pub operation: Operation,
    /// Human-readable error message.
    pub message: String,
}

impl PolicyError {
    /// Create a new policy error.
    pub fn new(kind: PolicyErrorKind, operation: Operation, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            message: message.into(),
        }
    }

    /// No session is active.
    pub fn not_authenticated(operation: Operation) -> Self {
        Self::new(
            PolicyErrorKind::NotAuthenticated,
            operation,
            format!("Login required to {}.", operation.describe()),
        )
    }

    /// The session's role does not grant the operation.
    pub fn permission_denied(operation: Operation, role: Role) -> Self {
        let allowed: Vec<String> = Role::ALL
            .into_iter()
            .filter(|r| crate::role::RolePermissions::for_role(*r).allows(operation))
            .map(|r| format!("{}s", r))
            .collect();
        Self::new(
            PolicyErrorKind::PermissionDenied,
            operation,
            format!(
                "Permission denied: Only {} can {} ({} role).",
                allowed.join(" and "),
                operation.describe(),
                role
            ),
        )
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PolicyError {}

/// Categories of policy errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyErrorKind {
    /// No session is active.
    NotAuthenticated,
    /// The role is not allowed to perform the operation.
    PermissionDenied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_message() {
        let err = PolicyError::permission_denied(Operation::AddProduct, Role::Worker);
        assert_eq!(err.kind, PolicyErrorKind::PermissionDenied);
        assert_eq!(
            err.to_string(),
            "Permission denied: Only Admins can add products (Worker role)."
        );
    }

    #[test]
    fn test_not_authenticated_message() {
        let err = PolicyError::not_authenticated(Operation::AdjustStock);
        assert_eq!(err.kind, PolicyErrorKind::NotAuthenticated);
        assert_eq!(err.operation, Operation::AdjustStock);
        assert!(err.to_string().contains("adjust stock"));
    }
}
