//! Route handlers organized by resource

pub mod health;
pub mod courses;
pub mod persons;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::http::server::{build_router, ServerConfig};

    /// Router over a pool that never connects; only usable for requests
    /// rejected before the store is reached.
    pub fn offline_router() -> Router {
        offline_router_with(&ServerConfig::default())
    }

    /// Offline router with a custom server configuration.
    pub fn offline_router_with(config: &ServerConfig) -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://enrollctl@127.0.0.1:1/enrollctl")
            .expect("valid url");
        build_router(pool, config)
    }

    /// Send one request and return status plus JSON body.
    pub async fn send(
        router: Router,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
