//! Core types for the userdir service.
//!
//! Defines the user record, its request body, id parsing, and the
//! in-memory [`UserStore`] the HTTP gateway mutates.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod seed;
pub mod store;
pub mod user;

pub use error::CoreError;
pub use id::{PathIdMode, UserId};
pub use seed::seed_users;
pub use store::{IdAssignment, UserStore};
pub use user::{User, UserDraft};
