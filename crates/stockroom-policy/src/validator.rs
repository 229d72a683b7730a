//! Access validator that composes session and role checks.
//!
//! Validation runs in this order:
//!
//! 1. **Session check** - an authenticated principal is required
//! 2. **Role check** - the principal's role must grant the operation

use crate::error::PolicyError;
use crate::request::AccessRequest;
use crate::role::RolePermissions;

/// Validates access requests against the role permission table.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessValidator;

impl AccessValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an access request.
    ///
    /// Returns `Ok(())` if the request may proceed.
    pub fn validate(&self, request: &AccessRequest) -> Result<(), PolicyError> {
        let Some(role) = request.role else {
            tracing::warn!(operation = %request.operation, "Rejected request without a session");
            return Err(PolicyError::not_authenticated(request.operation));
        };

        if let Err(err) = RolePermissions::for_role(role).check(request.operation) {
            tracing::warn!(
                operation = %request.operation,
                principal = request.principal.unwrap_or("unknown"),
                role = %role,
                "Permission denied"
            );
            return Err(err);
        }

        tracing::debug!(
            operation = %request.operation,
            principal = request.principal.unwrap_or("unknown"),
            "Access granted"
        );
        Ok(())
    }
}
