//! String commands.

use std::time::Duration;

use redis::AsyncCommands;

use svckit_core::error::AppError;
use svckit_core::result::AppResult;

use crate::codec::{FromWire, ToWire};

use super::store::{RedisStore, decode_each_lossy, decode_opt, encode, millis};

impl RedisStore {
    /// Store `value` under `key`. A `ttl` of `None` or zero means no expiry.
    pub async fn set<V: ToWire + ?Sized>(
        &self,
        key: &str,
        value: &V,
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(self.key(key)?).arg(encode(value)?);
        if let Some(ttl) = ttl.filter(|t| !t.is_zero()) {
            cmd.arg("PX").arg(millis(ttl));
        }
        self.query(&cmd).await
    }

    /// Read and decode `key`. `None` if the key does not exist.
    pub async fn get<T: FromWire>(&self, key: &str) -> AppResult<Option<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Option<String> = conn.get(&key).await.map_err(Self::map_err)?;
        decode_opt(raw)
    }

    /// Store text under an unprefixed key.
    pub async fn set_raw(&self, key: &str, value: &str) -> AppResult<()> {
        if key.is_empty() {
            return Err(AppError::validation("Cache key must not be empty"));
        }
        let mut conn = self.conn();
        conn.set(key, value).await.map_err(Self::map_err)
    }

    /// Read text from an unprefixed key.
    pub async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        if key.is_empty() {
            return Err(AppError::validation("Cache key must not be empty"));
        }
        let mut conn = self.conn();
        conn.get(key).await.map_err(Self::map_err)
    }

    /// Substring of the stored text between `start` and `end`, inclusive.
    pub async fn get_range(&self, key: &str, start: i64, end: i64) -> AppResult<String> {
        self.query(redis::cmd("GETRANGE").arg(self.key(key)?).arg(start).arg(end))
            .await
    }

    /// Replace the value under `key`, returning the previous one.
    pub async fn get_set<T: FromWire, V: ToWire + ?Sized>(
        &self,
        key: &str,
        value: &V,
    ) -> AppResult<Option<T>> {
        let key = self.key(key)?;
        let value = encode(value)?;
        let mut conn = self.conn();
        let raw: Option<String> = conn.getset(&key, value).await.map_err(Self::map_err)?;
        decode_opt(raw)
    }

    /// Bit at `offset`.
    pub async fn get_bit(&self, key: &str, offset: u64) -> AppResult<bool> {
        self.query(redis::cmd("GETBIT").arg(self.key(key)?).arg(offset))
            .await
    }

    /// Set the bit at `offset`, returning the previous bit.
    pub async fn set_bit(&self, key: &str, offset: u64, bit: bool) -> AppResult<bool> {
        self.query(
            redis::cmd("SETBIT")
                .arg(self.key(key)?)
                .arg(offset)
                .arg(u8::from(bit)),
        )
        .await
    }

    /// Store `value` with an expiry in whole seconds.
    pub async fn set_ex<V: ToWire + ?Sized>(
        &self,
        key: &str,
        value: &V,
        seconds: u64,
    ) -> AppResult<()> {
        let key = self.key(key)?;
        let value = encode(value)?;
        let mut conn = self.conn();
        conn.set_ex(&key, value, seconds)
            .await
            .map_err(Self::map_err)
    }

    /// Store `value` with an expiry in milliseconds.
    pub async fn pset_ex<V: ToWire + ?Sized>(
        &self,
        key: &str,
        value: &V,
        ttl: Duration,
    ) -> AppResult<()> {
        self.query(
            redis::cmd("PSETEX")
                .arg(self.key(key)?)
                .arg(millis(ttl))
                .arg(encode(value)?),
        )
        .await
    }

    /// Store `value` only if `key` does not exist. Returns whether it was set.
    pub async fn set_nx<V: ToWire + ?Sized>(&self, key: &str, value: &V) -> AppResult<bool> {
        let key = self.key(key)?;
        let value = encode(value)?;
        let mut conn = self.conn();
        conn.set_nx(&key, value).await.map_err(Self::map_err)
    }

    /// Store `value` with an expiry only if `key` does not exist.
    pub async fn set_nx_ex<V: ToWire + ?Sized>(
        &self,
        key: &str,
        value: &V,
        ttl: Duration,
    ) -> AppResult<bool> {
        let reply: Option<String> = self
            .query(
                redis::cmd("SET")
                    .arg(self.key(key)?)
                    .arg(encode(value)?)
                    .arg("NX")
                    .arg("PX")
                    .arg(millis(ttl)),
            )
            .await?;
        Ok(reply.is_some())
    }

    /// Overwrite part of the stored text starting at `offset`. Returns the new length.
    pub async fn set_range<V: ToWire + ?Sized>(
        &self,
        key: &str,
        offset: u64,
        value: &V,
    ) -> AppResult<u64> {
        self.query(
            redis::cmd("SETRANGE")
                .arg(self.key(key)?)
                .arg(offset)
                .arg(encode(value)?),
        )
        .await
    }

    /// Length of the stored text.
    pub async fn strlen(&self, key: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.strlen(&key).await.map_err(Self::map_err)
    }

    /// Store several key/value pairs at once.
    pub async fn mset<K: AsRef<str>, V: ToWire>(&self, pairs: &[(K, V)]) -> AppResult<()> {
        let cmd = self.pairs_cmd("MSET", pairs)?;
        self.query(&cmd).await
    }

    /// Store several pairs only if none of the keys exist. Returns whether they were set.
    pub async fn msetnx<K: AsRef<str>, V: ToWire>(&self, pairs: &[(K, V)]) -> AppResult<bool> {
        let cmd = self.pairs_cmd("MSETNX", pairs)?;
        self.query(&cmd).await
    }

    /// Read several keys. Missing or undecodable entries are `None`.
    pub async fn mget<T: FromWire, K: AsRef<str>>(&self, keys: &[K]) -> AppResult<Vec<Option<T>>> {
        let raw: Vec<Option<String>> = self.query(redis::cmd("MGET").arg(self.keys(keys)?)).await?;
        Ok(decode_each_lossy(raw))
    }

    /// Increment by one.
    pub async fn incr(&self, key: &str) -> AppResult<i64> {
        self.incr_by(key, 1).await
    }

    /// Increment by `by`.
    pub async fn incr_by(&self, key: &str, by: i64) -> AppResult<i64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.incr(&key, by).await.map_err(Self::map_err)
    }

    /// Increment by a float.
    pub async fn incr_by_float(&self, key: &str, by: f64) -> AppResult<f64> {
        self.query(redis::cmd("INCRBYFLOAT").arg(self.key(key)?).arg(by))
            .await
    }

    /// Decrement by one.
    pub async fn decr(&self, key: &str) -> AppResult<i64> {
        self.decr_by(key, 1).await
    }

    /// Decrement by `by`.
    pub async fn decr_by(&self, key: &str, by: i64) -> AppResult<i64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.decr(&key, by).await.map_err(Self::map_err)
    }

    /// Append to the stored text. Returns the new length.
    pub async fn append<V: ToWire + ?Sized>(&self, key: &str, value: &V) -> AppResult<u64> {
        let key = self.key(key)?;
        let value = encode(value)?;
        let mut conn = self.conn();
        conn.append(&key, value).await.map_err(Self::map_err)
    }

    fn pairs_cmd<K: AsRef<str>, V: ToWire>(
        &self,
        name: &str,
        pairs: &[(K, V)],
    ) -> AppResult<redis::Cmd> {
        if pairs.is_empty() {
            return Err(AppError::validation("At least one key is required"));
        }
        let mut cmd = redis::cmd(name);
        for (key, value) in pairs {
            cmd.arg(self.key(key.as_ref())?).arg(encode(value)?);
        }
        Ok(cmd)
    }
}
