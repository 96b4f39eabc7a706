//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use userdir_core::{CoreError, UserId};
use utoipa::ToSchema;

/// Body returned with `404 Not Found`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "User not found")]
    pub message: String,
}

/// Body returned with `400 Bad Request`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// No user carries the requested id.
    #[error("User not found")]
    UserNotFound(UserId),

    /// The request body could not be decoded as a user.
    #[error("{0}")]
    InvalidBody(String),

    /// The `{id}` path segment was rejected by strict parsing.
    #[error("{0}")]
    InvalidPathId(String),

    /// A core failure with no dedicated HTTP mapping.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(id) => Self::UserNotFound(id),
            CoreError::Decode(reason) => Self::InvalidBody(reason),
            e @ CoreError::InvalidUserId { .. } => Self::InvalidPathId(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::UserNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(MessageBody { message: self.to_string() }),
            )
                .into_response(),
            GatewayError::InvalidBody(_) | GatewayError::InvalidPathId(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: self.to_string() }),
            )
                .into_response(),
            GatewayError::Internal(_) => {
                tracing::error!(error = %self, "unmapped core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody { error: self.to_string() }),
                )
                    .into_response()
            }
        }
    }
}
