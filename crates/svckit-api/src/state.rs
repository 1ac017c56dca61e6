//! Application state shared across handlers.

use chrono::{DateTime, Utc};

use svckit_cache::RedisStore;

/// State handed to every handler through Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Redis store, if the server was started with one.
    pub store: Option<RedisStore>,
    /// When the process started serving.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// State with a Redis store, started now.
    pub fn new(store: RedisStore) -> Self {
        Self {
            store: Some(store),
            started_at: Utc::now(),
        }
    }

    /// State without a cache backend.
    pub fn without_cache() -> Self {
        Self {
            store: None,
            started_at: Utc::now(),
        }
    }

    /// Whole seconds since start.
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
