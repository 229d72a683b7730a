use serde::{Deserialize, Serialize};
use std::fmt;

// Configuration types shared across all stockroom crates
pub mod config;

// Product records and typed update requests
pub mod product;

pub use config::{AccountConfig, AppConfig, AuditConfig, ConfigError};
pub use product::{FieldError, Product, ProductField, ProductUpdate};

/// Access tier of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
    User,
}

impl Role {
    /// All roles, in menu order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Worker, Role::User];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Worker => write!(f, "Worker"),
            Role::User => write!(f, "User"),
        }
    }
}

/// A registered account.
///
/// Passwords are stored and compared in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    /// Check a candidate password against the stored one.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
