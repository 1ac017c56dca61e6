//! Hash commands. Field names are not prefixed; only the hash key is.

use std::collections::HashMap;

use redis::AsyncCommands;

use svckit_core::error::AppError;
use svckit_core::result::AppResult;

use crate::codec::{FromWire, ToWire};

use super::store::{
    RedisStore, decode_all, decode_each_lossy, decode_fields_lossy, decode_opt, encode,
};

impl RedisStore {
    /// Delete fields. Returns how many were removed.
    pub async fn hdel<F: AsRef<str>>(&self, key: &str, fields: &[F]) -> AppResult<u64> {
        let fields = non_empty_fields(fields)?;
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.hdel(&key, fields).await.map_err(Self::map_err)
    }

    /// Whether `field` exists in the hash.
    pub async fn hexists(&self, key: &str, field: &str) -> AppResult<bool> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.hexists(&key, field).await.map_err(Self::map_err)
    }

    /// Read and decode one field.
    pub async fn hget<T: FromWire>(&self, key: &str, field: &str) -> AppResult<Option<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Option<String> = conn.hget(&key, field).await.map_err(Self::map_err)?;
        decode_opt(raw)
    }

    /// Read every field. Fields whose value does not decode as `T` are skipped.
    pub async fn hget_all<T: FromWire>(&self, key: &str) -> AppResult<HashMap<String, T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: HashMap<String, String> = conn.hgetall(&key).await.map_err(Self::map_err)?;
        Ok(decode_fields_lossy(raw))
    }

    /// Increment a field by `by`.
    pub async fn hincr_by(&self, key: &str, field: &str, by: i64) -> AppResult<i64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.hincr(&key, field, by).await.map_err(Self::map_err)
    }

    /// Increment a field by a float.
    pub async fn hincr_by_float(&self, key: &str, field: &str, by: f64) -> AppResult<f64> {
        self.query(
            redis::cmd("HINCRBYFLOAT")
                .arg(self.key(key)?)
                .arg(field)
                .arg(by),
        )
        .await
    }

    /// Field names.
    pub async fn hkeys(&self, key: &str) -> AppResult<Vec<String>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.hkeys(&key).await.map_err(Self::map_err)
    }

    /// Number of fields.
    pub async fn hlen(&self, key: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.hlen(&key).await.map_err(Self::map_err)
    }

    /// Read several fields. Missing or undecodable entries are `None`.
    pub async fn hmget<T: FromWire, F: AsRef<str>>(
        &self,
        key: &str,
        fields: &[F],
    ) -> AppResult<Vec<Option<T>>> {
        let fields = non_empty_fields(fields)?;
        let raw: Vec<Option<String>> = self
            .query(redis::cmd("HMGET").arg(self.key(key)?).arg(fields))
            .await?;
        Ok(decode_each_lossy(raw))
    }

    /// Write several fields at once.
    pub async fn hmset<F: AsRef<str>, V: ToWire>(
        &self,
        key: &str,
        pairs: &[(F, V)],
    ) -> AppResult<()> {
        if pairs.is_empty() {
            return Err(AppError::validation("At least one field is required"));
        }
        let key = self.key(key)?;
        let mut items: Vec<(&str, String)> = Vec::with_capacity(pairs.len());
        for (field, value) in pairs {
            items.push((field.as_ref(), encode(value)?));
        }
        let mut conn = self.conn();
        conn.hset_multiple(&key, items.as_slice())
            .await
            .map_err(Self::map_err)
    }

    /// Write one field. Returns `true` if the field is new.
    pub async fn hset<V: ToWire + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &V,
    ) -> AppResult<bool> {
        let key = self.key(key)?;
        let value = encode(value)?;
        let mut conn = self.conn();
        conn.hset(&key, field, value).await.map_err(Self::map_err)
    }

    /// Write one field only if it does not exist yet.
    pub async fn hsetnx<V: ToWire + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &V,
    ) -> AppResult<bool> {
        let key = self.key(key)?;
        let value = encode(value)?;
        let mut conn = self.conn();
        conn.hset_nx(&key, field, value).await.map_err(Self::map_err)
    }

    /// Every value, decoded. Fails on the first value that does not decode.
    pub async fn hvals<T: FromWire>(&self, key: &str) -> AppResult<Vec<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn.hvals(&key).await.map_err(Self::map_err)?;
        decode_all(raw)
    }
}

fn non_empty_fields<F: AsRef<str>>(fields: &[F]) -> AppResult<Vec<&str>> {
    if fields.is_empty() {
        return Err(AppError::validation("At least one field is required"));
    }
    Ok(fields.iter().map(AsRef::as_ref).collect())
}
