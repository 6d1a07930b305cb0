//! API error types with IntoResponse
//!
//! Every domain error becomes exactly one status code and error envelope.
//! Store failures are logged; their detail never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::{encode, ErrorBody};
use crate::db::repos::DbError;
use crate::models::InputError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed decode, validation or mapping (400)
    Input(InputError),

    /// Malformed path parameter or failed precondition (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique key already taken (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Input(InputError::Validation(problems)) => {
                tracing::warn!(?problems, "problems validating input");
                (StatusCode::BAD_REQUEST, ErrorBody::problems(problems))
            }
            Self::Input(InputError::Decode(e)) => {
                tracing::warn!(error = %e, "malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::message("missing values or malformed body"),
                )
            }
            Self::Input(InputError::Mapping(e)) => {
                tracing::warn!(error = %e, "input mapping failed");
                (StatusCode::BAD_REQUEST, ErrorBody::message(e.to_string()))
            }
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, ErrorBody::message(message)),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                ErrorBody::message(format!("{} '{}' not found", resource, id)),
            ),
            Self::Conflict { message } => (StatusCode::CONFLICT, ErrorBody::message(message)),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("an internal error occurred"),
                )
            }
        };

        encode(status, &body)
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::InvalidInput(message) => Self::BadRequest { message },
            DbError::UnknownCourse => Self::bad_request(e.to_string()),
            DbError::Conflict(message) => Self::Conflict { message },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
