//! Role-based permissions.
//!
//! Each role maps to a fixed set of operations:
//! - Admin: everything
//! - Worker, User: read the catalog and adjust stock

use crate::error::PolicyError;
use crate::request::Operation;
use stockroom_core::Role;

const ADMIN_OPERATIONS: &[Operation] = &Operation::ALL;

const STAFF_OPERATIONS: &[Operation] = &[
    Operation::ViewInventory,
    Operation::SearchProduct,
    Operation::AdjustStock,
];

/// Operations granted to a single role.
#[derive(Debug, Clone, Copy)]
pub struct RolePermissions {
    role: Role,
    operations: &'static [Operation],
}

impl RolePermissions {
    /// Look up the permission set of a role.
    pub fn for_role(role: Role) -> Self {
        let operations = match role {
            Role::Admin => ADMIN_OPERATIONS,
            Role::Worker | Role::User => STAFF_OPERATIONS,
        };
        Self { role, operations }
    }

    /// The role these permissions belong to.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Every operation granted to the role.
    pub fn operations(&self) -> &'static [Operation] {
        self.operations
    }

    /// Check whether the role may perform an operation.
    pub fn allows(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Validate an operation against the role.
    pub fn check(&self, operation: Operation) -> Result<(), PolicyError> {
        if self.allows(operation) {
            Ok(())
        } else {
            Err(PolicyError::permission_denied(operation, self.role))
        }
    }
}
