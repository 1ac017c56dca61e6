//! Route definitions for the svckit HTTP API.

use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::middleware as axum_middleware;
use axum::{Router, routing::get};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::response::NO_CACHE;
use crate::state::AppState;

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/monitor", get(handlers::health::monitor))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(NO_CACHE),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::health::MonitorInfo;
    use svckit_core::types::DataResponse;

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app = build_router(AppState::without_cache());
        let response = app.oneshot(get_request("/health")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).expect("header"),
            NO_CACHE
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_monitor_reports_uptime() {
        let app = build_router(AppState::without_cache());
        let response = app.oneshot(get_request("/monitor")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let envelope: DataResponse<MonitorInfo> = serde_json::from_slice(&body).expect("json");
        let info = envelope.data.expect("data");
        assert_eq!(envelope.message, "Success");
        assert_eq!(info.cache, "disabled");
        assert!(info.uptime_seconds >= 0);
        assert_eq!(info.start_time.len(), "2024-01-01 00:00:00".len());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = build_router(AppState::without_cache());
        let response = app.oneshot(get_request("/nope")).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
