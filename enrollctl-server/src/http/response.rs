//! Uniform JSON response envelope
//!
//! Success bodies are `{"data": ...}` (or `{"message": ...}` for deletes),
//! error bodies are `{"error": ..., "validation_errors": [...]}` with
//! absent fields omitted. Bodies are serialized before the status line is
//! produced, so an encoding failure still yields a clean 500.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::models::Problem;

/// Body sent when the real payload cannot be serialized
const FALLBACK_BODY: &str = r#"{"error":"Internal server error"}"#;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error envelope
#[derive(Debug, Default, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<Problem>>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            validation_errors: None,
        }
    }

    pub fn problems(problems: Vec<Problem>) -> Self {
        Self {
            error: None,
            validation_errors: Some(problems),
        }
    }
}

/// Serialize `payload` as JSON with the given status.
pub fn encode<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(bytes) => json_response(status, bytes),
        Err(e) => {
            tracing::error!(error = %e, status = status.as_u16(), "error while encoding response body");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY.as_bytes().to_vec())
        }
    }
}

/// `{"data": payload}`
pub fn data<T: Serialize>(status: StatusCode, payload: T) -> Response {
    encode(status, &Envelope { data: payload })
}

/// `{"message": message}` with 200 OK
pub fn message(message: impl Into<String>) -> Response {
    encode(
        StatusCode::OK,
        &MessageBody {
            message: message.into(),
        },
    )
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::collections::HashMap;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn wraps_payload_in_data() {
        let response = data(StatusCode::CREATED, vec![1, 2]);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_json(response).await, serde_json::json!({"data": [1, 2]}));
    }

    #[tokio::test]
    async fn error_body_omits_absent_fields() {
        let response = encode(StatusCode::NOT_FOUND, &ErrorBody::message("gone"));
        assert_eq!(body_json(response).await, serde_json::json!({"error": "gone"}));
    }

    #[tokio::test]
    async fn unserializable_payload_falls_back_to_500() {
        // serde_json rejects non-string map keys
        let mut payload = HashMap::new();
        payload.insert((1, 2), 3);

        let response = data(StatusCode::OK, payload);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Internal server error"})
        );
    }
}
