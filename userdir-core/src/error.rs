use crate::id::UserId;

/// Errors produced by the `userdir-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// No record in the store carries the requested id.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// A request body could not be decoded as a user draft.
    #[error("{0}")]
    Decode(String),

    /// A path segment is not a valid user id (strict parsing only).
    #[error("invalid user id '{raw}'")]
    InvalidUserId { raw: String },
}
