//! Account registries and the active session.
//!
//! Accounts live in two registries: one for workers and one for everybody
//! else (admins and regular users). Login consults the regular registry
//! first, then the worker registry.

use indexmap::IndexMap;
use stockroom_core::{Role, User};

use crate::error::InventoryError;

/// The identity behind the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    fn for_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Username-keyed accounts, kept in registration order.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    users: IndexMap<String, User>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Insert a user, returning `false` if the username is taken.
    fn insert(&mut self, user: User) -> bool {
        if self.users.contains_key(&user.username) {
            return false;
        }
        self.users.insert(user.username.clone(), user);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Both account registries.
#[derive(Debug, Default, Clone)]
pub struct Accounts {
    users: Registry,
    workers: Registry,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account in the registry matching its role.
    pub fn register(&mut self, user: User) -> Result<(), InventoryError> {
        let role = user.role;
        let registry = match role {
            Role::Worker => &mut self.workers,
            Role::Admin | Role::User => &mut self.users,
        };

        let username = user.username.clone();
        if !registry.insert(user) {
            return Err(InventoryError::duplicate_user(&username, role));
        }

        tracing::debug!(username = %username, role = %role, "Registered account");
        Ok(())
    }

    /// Look a username up across both registries (regular first).
    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.get(username).or_else(|| self.workers.get(username))
    }

    /// Check a username/password pair.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session, InventoryError> {
        match self.find(username) {
            Some(user) if user.verify_password(password) => Ok(Session::for_user(user)),
            _ => Err(InventoryError::InvalidCredentials),
        }
    }

    /// Admins and regular users.
    pub fn users(&self) -> &Registry {
        &self.users
    }

    /// Worker accounts.
    pub fn workers(&self) -> &Registry {
        &self.workers
    }
}
