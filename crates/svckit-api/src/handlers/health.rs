//! Health and monitor handlers.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use svckit_core::types::pagination::TIME_FORMAT;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Body of `GET /monitor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    /// Process start time, `YYYY-MM-DD HH:MM:SS` UTC.
    pub start_time: String,
    /// Seconds since start.
    pub uptime_seconds: i64,
    /// Package version.
    pub version: String,
    /// `"connected"`, `"unavailable"`, or `"disabled"`.
    pub cache: String,
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /monitor
pub async fn monitor(State(state): State<AppState>) -> ApiResponse<MonitorInfo> {
    let cache = match &state.store {
        Some(store) => match store.ping().await {
            Ok(true) => "connected",
            Ok(false) | Err(_) => "unavailable",
        },
        None => "disabled",
    };

    ApiResponse::ok(MonitorInfo {
        start_time: state.started_at.format(TIME_FORMAT).to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: cache.to_string(),
    })
}
