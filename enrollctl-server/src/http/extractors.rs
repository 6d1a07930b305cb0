//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// Extract and parse a course id from path
pub struct CourseId(pub i32);

impl<S> FromRequestParts<S> for CourseId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("missing course ID"))?;

        let id = id
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request("invalid course ID"))?;

        Ok(Self(id))
    }
}

/// Extract a person's first name from path
pub struct FirstName(pub String);

impl<S> FromRequestParts<S> for FirstName
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("missing person firstName"))?;

        if name.is_empty() {
            return Err(ApiError::bad_request("missing person firstName"));
        }

        Ok(Self(name))
    }
}
