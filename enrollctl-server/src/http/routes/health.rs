//! Liveness and store reachability

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// How long the store probe may take before it counts as down
const PROBE_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health - 200 when the store answers, 503 otherwise
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let probe = sqlx::query("SELECT 1").execute(&state.pool);
    let reachable = matches!(tokio::time::timeout(PROBE_TIMEOUT, probe).await, Ok(Ok(_)));

    let (status, label, database) = if reachable {
        (StatusCode::OK, "ok", "up")
    } else {
        tracing::warn!("health probe could not reach database");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{offline_router, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn unreachable_store_is_degraded() {
        let (status, body) = send(offline_router(), Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "down");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
