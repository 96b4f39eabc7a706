//! Records the service starts with.

use crate::{id::UserId, user::User};

/// Returns the two records every fresh store is seeded with.
#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(UserId(1), "John Doe", "john.doe@example.com"),
        User::new(UserId(2), "Jane Smith", "jane.smith@example.com"),
    ]
}
