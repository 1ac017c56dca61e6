//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod cache;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::cache::RedisConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// The top-level deserialization target for the merged configuration files
/// (`config/default` + environment overlay) and `SVCKIT__*` variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Redis connection and namespace settings.
    #[serde(default)]
    pub redis: RedisConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default` with `config/{env}` (both optional) and
    /// environment variables prefixed with `SVCKIT`, e.g.
    /// `SVCKIT__REDIS__KEY_PREFIX=app`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SVCKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = AppConfig::from_toml("").expect("empty config should parse");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.redis.host, "127.0.0.1:6379");
        assert_eq!(config.redis.key_prefix, "svckit");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [redis]
            host = "cache:6380"
            password = "s3cret"
            db = 2
            key_prefix = "app"

            [logging]
            format = "pretty"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.redis.key_prefix, "app");
        assert_eq!(config.redis.connection_url(), "redis://:s3cret@cache:6380/2");
        assert_eq!(config.logging.format, "pretty");
    }
}
