//! List commands.

use std::time::Duration;

use redis::AsyncCommands;

use svckit_core::result::AppResult;

use crate::codec::{FromWire, ToWire};

use super::store::{RedisStore, decode_all, decode_opt, encode, encode_all};

/// Where `LINSERT` places the new element relative to the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Insert before the pivot.
    Before,
    /// Insert after the pivot.
    After,
}

impl InsertPosition {
    fn as_arg(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
        }
    }
}

impl RedisStore {
    /// Pop from the head of the first non-empty list, waiting up to `timeout`.
    /// Returns the popped value, or `None` on timeout.
    pub async fn blpop<T: FromWire, K: AsRef<str>>(
        &self,
        keys: &[K],
        timeout: Duration,
    ) -> AppResult<Option<T>> {
        self.blocking_pop("BLPOP", keys, timeout).await
    }

    /// Pop from the tail of the first non-empty list, waiting up to `timeout`.
    pub async fn brpop<T: FromWire, K: AsRef<str>>(
        &self,
        keys: &[K],
        timeout: Duration,
    ) -> AppResult<Option<T>> {
        self.blocking_pop("BRPOP", keys, timeout).await
    }

    /// Move the tail of `source` to the head of `destination`, waiting up to
    /// `timeout`. Returns the moved value.
    pub async fn brpoplpush<T: FromWire>(
        &self,
        source: &str,
        destination: &str,
        timeout: Duration,
    ) -> AppResult<Option<T>> {
        let raw: Option<String> = self
            .query_blocking(
                redis::cmd("BRPOPLPUSH")
                    .arg(self.key(source)?)
                    .arg(self.key(destination)?)
                    .arg(timeout.as_secs_f64()),
            )
            .await?;
        decode_opt(raw)
    }

    /// Element at `index`.
    pub async fn lindex<T: FromWire>(&self, key: &str, index: i64) -> AppResult<Option<T>> {
        let raw: Option<String> = self
            .query(redis::cmd("LINDEX").arg(self.key(key)?).arg(index))
            .await?;
        decode_opt(raw)
    }

    /// Insert `value` next to `pivot`. Returns the new length, or `-1` if the
    /// pivot was not found.
    pub async fn linsert<P: ToWire + ?Sized, V: ToWire + ?Sized>(
        &self,
        key: &str,
        position: InsertPosition,
        pivot: &P,
        value: &V,
    ) -> AppResult<i64> {
        self.query(
            redis::cmd("LINSERT")
                .arg(self.key(key)?)
                .arg(position.as_arg())
                .arg(encode(pivot)?)
                .arg(encode(value)?),
        )
        .await
    }

    /// List length.
    pub async fn llen(&self, key: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.llen(&key).await.map_err(Self::map_err)
    }

    /// Pop from the head.
    pub async fn lpop<T: FromWire>(&self, key: &str) -> AppResult<Option<T>> {
        let raw: Option<String> = self.query(redis::cmd("LPOP").arg(self.key(key)?)).await?;
        decode_opt(raw)
    }

    /// Push onto the head. Returns the new length.
    pub async fn lpush<V: ToWire>(&self, key: &str, values: &[V]) -> AppResult<u64> {
        let (key, values) = self.push_args(key, values)?;
        let mut conn = self.conn();
        conn.lpush(&key, values).await.map_err(Self::map_err)
    }

    /// Push onto the head only if the list exists.
    pub async fn lpushx<V: ToWire>(&self, key: &str, values: &[V]) -> AppResult<u64> {
        let (key, values) = self.push_args(key, values)?;
        let mut conn = self.conn();
        conn.lpush_exists(&key, values).await.map_err(Self::map_err)
    }

    /// Elements between `start` and `stop`, inclusive. Fails on the first
    /// element that does not decode.
    pub async fn lrange<T: FromWire>(&self, key: &str, start: i64, stop: i64) -> AppResult<Vec<T>> {
        let raw: Vec<String> = self
            .query(redis::cmd("LRANGE").arg(self.key(key)?).arg(start).arg(stop))
            .await?;
        decode_all(raw)
    }

    /// Remove up to `count` occurrences of `value`. Returns how many were removed.
    pub async fn lrem<V: ToWire + ?Sized>(&self, key: &str, count: i64, value: &V) -> AppResult<u64> {
        self.query(
            redis::cmd("LREM")
                .arg(self.key(key)?)
                .arg(count)
                .arg(encode(value)?),
        )
        .await
    }

    /// Overwrite the element at `index`.
    pub async fn lset<V: ToWire + ?Sized>(&self, key: &str, index: i64, value: &V) -> AppResult<()> {
        self.query(
            redis::cmd("LSET")
                .arg(self.key(key)?)
                .arg(index)
                .arg(encode(value)?),
        )
        .await
    }

    /// Keep only the elements between `start` and `stop`.
    pub async fn ltrim(&self, key: &str, start: i64, stop: i64) -> AppResult<()> {
        self.query(redis::cmd("LTRIM").arg(self.key(key)?).arg(start).arg(stop))
            .await
    }

    /// Pop from the tail.
    pub async fn rpop<T: FromWire>(&self, key: &str) -> AppResult<Option<T>> {
        let raw: Option<String> = self.query(redis::cmd("RPOP").arg(self.key(key)?)).await?;
        decode_opt(raw)
    }

    /// Move the tail of `source` to the head of `destination`.
    pub async fn rpoplpush<T: FromWire>(
        &self,
        source: &str,
        destination: &str,
    ) -> AppResult<Option<T>> {
        let source = self.key(source)?;
        let destination = self.key(destination)?;
        let mut conn = self.conn();
        let raw: Option<String> = conn
            .rpoplpush(&source, &destination)
            .await
            .map_err(Self::map_err)?;
        decode_opt(raw)
    }

    /// Push onto the tail. Returns the new length.
    pub async fn rpush<V: ToWire>(&self, key: &str, values: &[V]) -> AppResult<u64> {
        let (key, values) = self.push_args(key, values)?;
        let mut conn = self.conn();
        conn.rpush(&key, values).await.map_err(Self::map_err)
    }

    /// Push onto the tail only if the list exists.
    pub async fn rpushx<V: ToWire>(&self, key: &str, values: &[V]) -> AppResult<u64> {
        let (key, values) = self.push_args(key, values)?;
        let mut conn = self.conn();
        conn.rpush_exists(&key, values).await.map_err(Self::map_err)
    }

    fn push_args<V: ToWire>(&self, key: &str, values: &[V]) -> AppResult<(String, Vec<String>)> {
        Ok((self.key(key)?, encode_all(values)?))
    }

    async fn blocking_pop<T: FromWire, K: AsRef<str>>(
        &self,
        name: &str,
        keys: &[K],
        timeout: Duration,
    ) -> AppResult<Option<T>> {
        let keys = self.keys(keys)?;
        let reply: Option<(String, String)> = self
            .query_blocking(redis::cmd(name).arg(keys).arg(timeout.as_secs_f64()))
            .await?;
        decode_opt(reply.map(|(_key, value)| value))
    }
}
