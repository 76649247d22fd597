//! Ordered user registry.
//!
//! Every lookup is a linear scan in insertion order and resolves to the
//! first matching record, so duplicate ids always hit the oldest entry.

use tracing::{debug, info};

use super::user::{seed_users, User};
use crate::error::RegistryError;

/// Result of an update that passed validation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A record with the same id was replaced in place.
    Replaced,
    /// No record carries the id; nothing changed.
    NotFound,
}

/// Ordered, in-memory sequence of user records.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given records in order.
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Create a registry holding the startup seed records.
    pub fn seeded() -> Self {
        Self::with_users(seed_users())
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }

    /// First record with the given id.
    pub fn get(&self, id: i64) -> Result<&User, RegistryError> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Validate and append a record. Duplicate ids are accepted.
    pub fn add(&mut self, user: User) -> Result<(), RegistryError> {
        user.check()?;

        if self.position(user.id).is_some() {
            debug!(id = user.id, "Appending user with an id already present");
        }

        info!(id = user.id, name = %user.name, "User added");
        self.users.push(user);
        Ok(())
    }

    /// Validate a record and replace the first record with the same id.
    pub fn update(&mut self, user: User) -> Result<UpdateOutcome, RegistryError> {
        user.check()?;

        match self.position(user.id) {
            Some(index) => {
                info!(id = user.id, name = %user.name, "User updated");
                self.users[index] = user;
                Ok(UpdateOutcome::Replaced)
            }
            None => {
                debug!(id = user.id, "Update matched no user");
                Ok(UpdateOutcome::NotFound)
            }
        }
    }

    /// Remove the first record with the given id and return it.
    pub fn remove(&mut self, id: i64) -> Result<User, RegistryError> {
        let index = self.position(id).ok_or(RegistryError::NotFound(id))?;
        let removed = self.users.remove(index);
        info!(id, "User removed");
        Ok(removed)
    }
}
