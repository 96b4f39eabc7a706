use std::{fmt, num::IntErrorKind, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of a user record. Serialized as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserId(pub i64);

impl UserId {
    /// Creates a `UserId` from a raw integer.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parses a path segment the forgiving way: anything that is not an
    /// integer becomes `0`, and out-of-range integers saturate.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(id) => Self(id),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self(i64::MAX),
                IntErrorKind::NegOverflow => Self(i64::MIN),
                _ => Self(0),
            },
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidUserId { raw: s.to_owned() })
    }
}

/// How a `{id}` path segment is turned into a [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathIdMode {
    /// Unparsable segments silently become id `0`.
    #[default]
    Lenient,
    /// Unparsable segments are rejected with [`CoreError::InvalidUserId`].
    Strict,
}

impl PathIdMode {
    /// Parses `raw` according to this mode.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidUserId`] in [`PathIdMode::Strict`] when
    /// `raw` is not an integer that fits in an `i64`. Never fails in
    /// [`PathIdMode::Lenient`].
    pub fn parse(self, raw: &str) -> Result<UserId, CoreError> {
        match self {
            Self::Lenient => Ok(UserId::parse_lenient(raw)),
            Self::Strict => raw.parse(),
        }
    }
}
