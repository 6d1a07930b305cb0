//! Course endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};

use crate::db::repos::CourseRepo;
use crate::http::error::ApiError;
use crate::http::extractors::CourseId;
use crate::http::response;
use crate::http::server::AppState;
use crate::models::{decode_validate, CourseInput, NewCourse};

/// GET /api/course - list all courses
async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let courses = CourseRepo::new(&state.pool).list().await?;
    Ok(response::data(StatusCode::OK, courses))
}

/// POST /api/course - create a course
async fn create_course(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let course = decode_validate::<CourseInput, NewCourse>(&body)?;
    let created = CourseRepo::new(&state.pool).create(&course.name).await?;

    tracing::info!(id = created.id, "course created");
    Ok(response::data(StatusCode::CREATED, created))
}

/// GET /api/course/{id} - get a single course
async fn get_course(
    State(state): State<Arc<AppState>>,
    CourseId(id): CourseId,
) -> Result<Response, ApiError> {
    let course = CourseRepo::new(&state.pool).get(id).await?;
    Ok(response::data(StatusCode::OK, course))
}

/// PUT /api/course/{id} - rename a course
async fn update_course(
    State(state): State<Arc<AppState>>,
    CourseId(id): CourseId,
    body: Bytes,
) -> Result<Response, ApiError> {
    let course = decode_validate::<CourseInput, NewCourse>(&body)?;
    let updated = CourseRepo::new(&state.pool).update(id, &course.name).await?;
    Ok(response::data(StatusCode::OK, updated))
}

/// DELETE /api/course/{id} - delete a course
async fn delete_course(
    State(state): State<Arc<AppState>>,
    CourseId(id): CourseId,
) -> Result<Response, ApiError> {
    CourseRepo::new(&state.pool).delete(id).await?;

    tracing::info!(id, "course deleted");
    Ok(response::message(format!("course {} deleted", id)))
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/course", get(list_courses).post(create_course))
        .route(
            "/api/course/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{offline_router, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn blank_name_is_rejected_before_store() {
        let (status, body) = send(offline_router(), Method::POST, "/api/course", r#"{"name": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"validation_errors": [{"name": "name", "description": "must not be blank"}]})
        );
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (status, body) = send(offline_router(), Method::PUT, "/api/course/1", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing values or malformed body");
    }

    #[tokio::test]
    async fn non_integer_id_is_rejected() {
        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(offline_router(), method, "/api/course/abc", "").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "invalid course ID");
        }
    }
}
