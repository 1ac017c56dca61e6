//! # svckit-api
//!
//! HTTP layer for svckit built on Axum.
//!
//! Wraps [`DataResponse`](svckit_core::types::DataResponse) as an Axum
//! response, maps `AppError` into the envelope, validates forms, and serves
//! the health and monitor endpoints.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod validation;

pub use response::{ApiError, ApiResponse, ApiResult};
pub use router::build_router;
pub use state::AppState;
pub use validation::check_form;
