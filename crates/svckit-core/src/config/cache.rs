//! Redis connection and key namespace configuration.

use serde::{Deserialize, Serialize};

/// Redis backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Full connection URL. When set, `host`, `password` and `db` are ignored.
    #[serde(default)]
    pub url: Option<String>,
    /// `host:port` of the Redis server.
    #[serde(default = "default_host")]
    pub host: String,
    /// Password (`AUTH`), if any. Must be URL-safe.
    #[serde(default)]
    pub password: Option<String>,
    /// Logical database index.
    #[serde(default)]
    pub db: u32,
    /// Namespace prepended to every key as `prefix:key`.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl RedisConfig {
    /// Build the `redis://` connection URL.
    pub fn connection_url(&self) -> String {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return url.to_string();
        }
        match self.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => format!("redis://:{password}@{}/{}", self.host, self.db),
            None => format!("redis://{}/{}", self.host, self.db),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            password: None,
            db: 0,
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1:6379".to_string()
}

fn default_key_prefix() -> String {
    "svckit".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_url_without_password() {
        let config = RedisConfig::default();
        assert_eq!(config.connection_url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_explicit_url_wins() {
        let config = RedisConfig {
            url: Some("rediss://user:pw@example:6380/3".to_string()),
            password: Some("ignored".to_string()),
            ..RedisConfig::default()
        };
        assert_eq!(config.connection_url(), "rediss://user:pw@example:6380/3");
    }
}
