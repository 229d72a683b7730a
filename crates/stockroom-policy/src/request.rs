//! Access request types.
//!
//! This module defines the operations subject to permission checks and the
//! request type used to pass the caller's context to the validator.

use std::fmt;
use stockroom_core::Role;

/// An operation exposed by the inventory system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert a new product into the catalog.
    AddProduct,
    /// Change fields of an existing product.
    UpdateProduct,
    /// Remove a product from the catalog.
    DeleteProduct,
    /// List every product.
    ViewInventory,
    /// Keyword search over names and categories.
    SearchProduct,
    /// Apply a signed quantity delta to a product.
    AdjustStock,
    /// List workers and the adjustment audit log.
    ViewWorkers,
    /// Register a new worker account.
    AddWorker,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::AddProduct,
        Operation::UpdateProduct,
        Operation::DeleteProduct,
        Operation::ViewInventory,
        Operation::SearchProduct,
        Operation::AdjustStock,
        Operation::ViewWorkers,
        Operation::AddWorker,
    ];

    /// Short verb phrase used in denial messages ("add products").
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::AddProduct => "add products",
            Operation::UpdateProduct => "update products",
            Operation::DeleteProduct => "delete products",
            Operation::ViewInventory => "view the inventory",
            Operation::SearchProduct => "search products",
            Operation::AdjustStock => "adjust stock",
            Operation::ViewWorkers => "view worker details",
            Operation::AddWorker => "add workers",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddProduct => write!(f, "ADD_PRODUCT"),
            Operation::UpdateProduct => write!(f, "UPDATE_PRODUCT"),
            Operation::DeleteProduct => write!(f, "DELETE_PRODUCT"),
            Operation::ViewInventory => write!(f, "VIEW_INVENTORY"),
            Operation::SearchProduct => write!(f, "SEARCH_PRODUCT"),
            Operation::AdjustStock => write!(f, "ADJUST_STOCK"),
            Operation::ViewWorkers => write!(f, "VIEW_WORKERS"),
            Operation::AddWorker => write!(f, "ADD_WORKER"),
        }
    }
}

/// A request to perform an operation, carrying the caller's session context.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// The operation being attempted.
    pub operation: Operation,
    /// Username of the active session, if any.
    pub principal: Option<&'a str>,
    /// Role of the active session, if any.
    pub role: Option<Role>,
}

impl<'a> AccessRequest<'a> {
    /// Request made by an authenticated caller.
    pub fn new(operation: Operation, principal: &'a str, role: Role) -> Self {
        Self {
            operation,
            principal: Some(principal),
            role: Some(role),
        }
    }

    /// Request made without an active session.
    pub fn anonymous(operation: Operation) -> Self {
        Self {
            operation,
            principal: None,
            role: None,
        }
    }
}
