//! Error types for inventory operations.

use stockroom_audit::AuditError;
use stockroom_core::Role;
use stockroom_policy::{PolicyError, PolicyErrorKind};
use thiserror::Error;

/// Errors returned by [`InventorySystem`](crate::InventorySystem) operations.
///
/// Every variant is recoverable: the caller reports it and carries on.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Unknown username or wrong password.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// The operation needs an active session.
    #[error("{0}")]
    NotAuthenticated(PolicyError),

    /// The session's role does not grant the operation.
    #[error("{0}")]
    PermissionDenied(PolicyError),

    /// No product with this ID.
    #[error("Product '{product_id}' not found.")]
    NotFound { product_id: String },

    /// A product ID or username is already taken.
    #[error("{entity} '{key}' already exists.")]
    DuplicateKey { entity: &'static str, key: String },

    /// The adjustment would drive stock below zero.
    #[error("Cannot reduce stock below 0. Current stock for '{product_name}' is {current}.")]
    InvalidStockAdjustment {
        product_id: String,
        product_name: String,
        current: u64,
        delta: i64,
    },

    /// The adjustment would exceed the representable stock quantity.
    #[error("Adjustment of {delta} overflows stock for '{product_name}' (current {current}).")]
    StockOverflow {
        product_id: String,
        product_name: String,
        current: u64,
        delta: i64,
    },

    /// The audit log refused the event; the adjustment was not applied.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl From<PolicyError> for InventoryError {
    fn from(err: PolicyError) -> Self {
        match err.kind {
            PolicyErrorKind::NotAuthenticated => InventoryError::NotAuthenticated(err),
            PolicyErrorKind::PermissionDenied => InventoryError::PermissionDenied(err),
        }
    }
}

impl InventoryError {
    pub(crate) fn duplicate_product(product_id: &str) -> Self {
        InventoryError::DuplicateKey {
            entity: "Product ID",
            key: product_id.to_string(),
        }
    }

    pub(crate) fn duplicate_user(username: &str, role: Role) -> Self {
        let entity = match role {
            Role::Worker => "Worker username",
            Role::Admin | Role::User => "Username",
        };
        InventoryError::DuplicateKey {
            entity,
            key: username.to_string(),
        }
    }

    pub(crate) fn not_found(product_id: &str) -> Self {
        InventoryError::NotFound {
            product_id: product_id.to_string(),
        }
    }

    /// Whether this is a permission or authentication refusal.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            InventoryError::NotAuthenticated(_) | InventoryError::PermissionDenied(_)
        )
    }
}
