//! The response envelope as an Axum response, and `AppError` mapping.
//!
//! Every envelope is sent with HTTP 200; the outcome lives in `code`.

use axum::Json;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use svckit_core::error::{AppError, ErrorKind};
use svckit_core::types::{DataResponse, ResponseCode};

/// `Cache-Control` value attached to every response.
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// A [`DataResponse`] rendered as JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse<T>(pub DataResponse<T>);

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self(DataResponse::ok(data))
    }

    /// A response with an explicit code and optional detail.
    pub fn with_code(code: ResponseCode, data: Option<T>, detail: Option<&str>) -> Self {
        Self(DataResponse::with_code(code, data, detail))
    }
}

impl<T> From<DataResponse<T>> for ApiResponse<T> {
    fn from(inner: DataResponse<T>) -> Self {
        Self(inner)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
        response
    }
}

/// An [`AppError`] rendered as an error envelope.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.kind {
            ErrorKind::Database
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
            }
            _ => {
                tracing::debug!(kind = %self.0.kind, error = %self.0.message, "Request rejected");
            }
        }
        ApiResponse(DataResponse::<()>::from_error(&self.0)).into_response()
    }
}

/// Result type for handlers returning the envelope.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_ok_response_has_no_cache_header() {
        let response = ApiResponse::ok("pong").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).expect("header"),
            NO_CACHE
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 200, "message": "Success", "data": "pong"})
        );
    }

    #[tokio::test]
    async fn test_error_maps_to_envelope_with_200() {
        let response = ApiError(AppError::not_found("user 7 not found")).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 404, "message": "user 7 not found", "data": null})
        );
    }

    #[tokio::test]
    async fn test_unclassified_error_is_system_error() {
        let response = ApiError(AppError::internal("disk full")).into_response();
        let json = body_json(response).await;
        assert_eq!(json["code"], 500);
        assert_eq!(json["message"], "System error: disk full");
    }
}
