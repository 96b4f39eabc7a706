//! In-memory user registry.
//!
//! Records live in a single `Vec` behind an `RwLock`, so listing order is
//! insertion order. Every mutation holds the write lock for its whole
//! duration, which keeps id assignment and append atomic.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::{
    error::CoreError,
    id::UserId,
    seed::seed_users,
    user::{User, UserDraft},
};

/// How [`UserStore::create`] picks the id of a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdAssignment {
    /// `record count + 1`. After a delete this can hand out an id that is
    /// still in use.
    #[default]
    Length,
    /// `max(existing id) + 1`, or `1` for an empty store.
    MaxPlusOne,
}

impl IdAssignment {
    fn next_id(self, users: &[User]) -> UserId {
        match self {
            Self::Length => {
                let count = i64::try_from(users.len()).unwrap_or(i64::MAX);
                UserId(count.saturating_add(1))
            }
            Self::MaxPlusOne => {
                let max = users.iter().map(|u| u.id.0).max().unwrap_or(0);
                UserId(max.saturating_add(1))
            }
        }
    }
}

/// Thread-safe, ordered collection of user records.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
    assignment: IdAssignment,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(assignment: IdAssignment) -> Self {
        Self::with_users(Vec::new(), assignment)
    }

    /// Create a store holding `users` in the given order.
    #[must_use]
    pub fn with_users(users: Vec<User>, assignment: IdAssignment) -> Self {
        Self {
            users: RwLock::new(users),
            assignment,
        }
    }

    /// Create a store holding the [`seed_users`] records.
    #[must_use]
    pub fn seeded(assignment: IdAssignment) -> Self {
        Self::with_users(seed_users(), assignment)
    }

    /// The id assignment policy this store was built with.
    #[must_use]
    pub fn assignment(&self) -> IdAssignment {
        self.assignment
    }

    /// Return every record in insertion order.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.read().clone()
    }

    /// Number of records currently held.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` when the store holds no records.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Return the first record whose id is `id`.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no record matches.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn find_by_id(&self, id: UserId) -> Result<User, CoreError> {
        let found = self.read().iter().find(|u| u.id == id).cloned();
        found.ok_or_else(|| {
            debug!(id = %id, "user lookup missed");
            CoreError::NotFound(id)
        })
    }

    /// Append a new record built from `draft` and return it.
    ///
    /// Any id carried by the draft is ignored.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn create(&self, draft: UserDraft) -> User {
        let mut users = self.write();
        let id = self.assignment.next_id(&users);
        let user = draft.into_user(id);
        users.push(user.clone());
        info!(id = %id, count = users.len(), "user created");
        user
    }

    /// Overwrite every field except the id of the record matching `id`.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no record matches.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn replace(&self, id: UserId, draft: UserDraft) -> Result<User, CoreError> {
        let mut users = self.write();
        let Some(slot) = users.iter_mut().find(|u| u.id == id) else {
            debug!(id = %id, "replace target missing");
            return Err(CoreError::NotFound(id));
        };
        *slot = draft.into_user(id);
        info!(id = %id, "user replaced");
        Ok(slot.clone())
    }

    /// Remove the first record matching `id`, keeping the others in order.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no record matches.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn delete(&self, id: UserId) -> Result<(), CoreError> {
        let mut users = self.write();
        let Some(pos) = users.iter().position(|u| u.id == id) else {
            debug!(id = %id, "delete target missing");
            return Err(CoreError::NotFound(id));
        };
        users.remove(pos);
        info!(id = %id, count = users.len(), "user deleted");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.users.read().expect("user store read lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.users.write().expect("user store write lock poisoned")
    }
}
