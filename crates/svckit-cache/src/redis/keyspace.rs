//! Key-level commands: existence, deletion, expiry, and namespace cleanup.

use std::time::Duration;

use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use tracing::debug;

use svckit_core::result::AppResult;

use super::store::{RedisStore, millis};

/// Keys fetched per `SCAN` round trip.
const SCAN_BATCH: u64 = 500;

impl RedisStore {
    /// Check that the server answers `PING`.
    pub async fn ping(&self) -> AppResult<bool> {
        let pong: String = self.query(&redis::cmd("PING")).await?;
        Ok(pong == "PONG")
    }

    /// Whether `key` exists.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.exists(&key).await.map_err(Self::map_err)
    }

    /// Delete `key`. Returns whether it existed.
    pub async fn delete(&self, key: &str) -> AppResult<bool> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let count: u64 = conn.del(&key).await.map_err(Self::map_err)?;
        Ok(count > 0)
    }

    /// Expire `key` after `ttl`. Returns `false` if the key does not exist.
    pub async fn expire_in(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.query(redis::cmd("PEXPIRE").arg(self.key(key)?).arg(millis(ttl)))
            .await
    }

    /// Expire `key` at `at`. Returns `false` if the key does not exist.
    pub async fn expire_at(&self, key: &str, at: DateTime<Utc>) -> AppResult<bool> {
        self.query(
            redis::cmd("PEXPIREAT")
                .arg(self.key(key)?)
                .arg(at.timestamp_millis()),
        )
        .await
    }

    /// Remaining time to live. `None` if the key is missing or never expires.
    pub async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        let ms: i64 = self.query(redis::cmd("PTTL").arg(self.key(key)?)).await?;
        Ok(u64::try_from(ms).ok().map(Duration::from_millis))
    }

    /// Delete every key in this store's namespace. Keys outside the
    /// namespace are left untouched, including keys of a sibling prefix that
    /// the scan pattern happens to match. Returns the number of keys deleted.
    pub async fn clear_namespace(&self) -> AppResult<u64> {
        let pattern = self.namespace().pattern("*");
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = self
                .query(
                    redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&pattern)
                        .arg("COUNT")
                        .arg(SCAN_BATCH),
                )
                .await?;

            let owned: Vec<&String> = keys
                .iter()
                .filter(|key| self.namespace().strip(key).is_some())
                .collect();
            if !owned.is_empty() {
                let mut conn = self.conn();
                let count: u64 = conn.del(&owned).await.map_err(Self::map_err)?;
                deleted += count;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(pattern, deleted, "Cleared namespace");
        Ok(deleted)
    }
}
