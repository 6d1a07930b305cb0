//! Person endpoints
//!
//! Persons are addressed by first name in the path.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};

use crate::db::repos::PersonRepo;
use crate::http::error::ApiError;
use crate::http::extractors::FirstName;
use crate::http::response;
use crate::http::server::AppState;
use crate::models::{decode_validate, NewPerson, PersonInput};

/// GET /api/person - list all persons with their courses
async fn list_persons(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let persons = PersonRepo::new(&state.pool).list().await?;
    Ok(response::data(StatusCode::OK, persons))
}

/// POST /api/person - create a person and enroll them
async fn create_person(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let person = decode_validate::<PersonInput, NewPerson>(&body)?;
    let created = PersonRepo::new(&state.pool).create(person).await?;

    tracing::info!(id = created.id, first_name = %created.first_name, "person created");
    Ok(response::data(StatusCode::CREATED, created))
}

/// GET /api/person/{first_name} - get a single person
async fn get_person(
    State(state): State<Arc<AppState>>,
    FirstName(first_name): FirstName,
) -> Result<Response, ApiError> {
    let person = PersonRepo::new(&state.pool)
        .get_by_first_name(&first_name)
        .await?;
    Ok(response::data(StatusCode::OK, person))
}

/// PUT /api/person/{first_name} - replace a person and their enrollments
async fn update_person(
    State(state): State<Arc<AppState>>,
    FirstName(first_name): FirstName,
    body: Bytes,
) -> Result<Response, ApiError> {
    let person = decode_validate::<PersonInput, NewPerson>(&body)?;
    let updated = PersonRepo::new(&state.pool)
        .update(&first_name, person)
        .await?;

    tracing::info!(id = updated.id, %first_name, "person updated");
    Ok(response::data(StatusCode::OK, updated))
}

/// DELETE /api/person/{first_name} - delete a person and their enrollments
async fn delete_person(
    State(state): State<Arc<AppState>>,
    FirstName(first_name): FirstName,
) -> Result<Response, ApiError> {
    PersonRepo::new(&state.pool).delete(&first_name).await?;

    tracing::info!(%first_name, "person deleted");
    Ok(response::message(format!("person '{}' deleted", first_name)))
}

/// Person routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/person", get(list_persons).post(create_person))
        .route(
            "/api/person/{first_name}",
            get(get_person).put(update_person).delete(delete_person),
        )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{offline_router, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn reports_all_validation_problems() {
        let (status, body) = send(
            offline_router(),
            Method::POST,
            "/api/person",
            r#"{"type": "ta", "age": -1}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let names: Vec<&str> = body["validation_errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["first_name", "last_name", "type", "age"]);
    }

    #[tokio::test]
    async fn update_validates_before_store() {
        let (status, body) = send(
            offline_router(),
            Method::PUT,
            "/api/person/Ada",
            r#"{"first_name": "Ada", "last_name": "", "type": "student", "age": 20}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["validation_errors"][0]["name"], "last_name");
    }

    #[tokio::test]
    async fn truncated_body_is_decode_error() {
        let (status, body) = send(
            offline_router(),
            Method::POST,
            "/api/person",
            r#"{"first_name": "Ada""#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing values or malformed body");
        assert!(body.get("validation_errors").is_none());
    }
}
