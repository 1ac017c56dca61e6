//! The namespaced, codec-aware Redis handle.

use std::collections::HashMap;

use redis::aio::ConnectionManager;
use redis::{AsyncConnectionConfig, Cmd, FromRedisValue};

use svckit_core::error::{AppError, ErrorKind};
use svckit_core::result::AppResult;

use crate::codec::{self, FromWire, ToWire};
use crate::keys::KeyNamespace;

use super::client::RedisClient;

/// Typed access to Redis under one key namespace.
///
/// Every key argument is namespaced, every written value goes through
/// [`codec::encode`], and every typed read goes through
/// [`codec::decode_value`]. Cloning is cheap; clones share the connection.
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    /// Wrap a connected client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Return the underlying client.
    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Return the key namespace.
    pub fn namespace(&self) -> &KeyNamespace {
        self.client.namespace()
    }

    /// Map a Redis error to an AppError.
    pub(crate) fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    /// Namespaced key for `key`.
    pub(crate) fn key(&self, key: &str) -> AppResult<String> {
        self.client.namespace().key(key)
    }

    /// Namespaced keys for every element of `keys`. At least one is required.
    pub(crate) fn keys<K: AsRef<str>>(&self, keys: &[K]) -> AppResult<Vec<String>> {
        if keys.is_empty() {
            return Err(AppError::validation("At least one key is required"));
        }
        self.client.namespace().keys(keys)
    }

    /// Clone of the managed connection, for `AsyncCommands` calls.
    pub(crate) fn conn(&self) -> ConnectionManager {
        self.client.conn_mut()
    }

    /// Run a command on a clone of the managed connection.
    pub(crate) async fn query<T: FromRedisValue>(&self, cmd: &Cmd) -> AppResult<T> {
        let mut conn = self.conn();
        cmd.query_async(&mut conn).await.map_err(Self::map_err)
    }

    /// Run a blocking command on its own connection so it does not stall
    /// commands multiplexed on the shared one. The connection has no
    /// response timeout; the command's own timeout bounds the wait.
    pub(crate) async fn query_blocking<T: FromRedisValue>(&self, cmd: &Cmd) -> AppResult<T> {
        let config = AsyncConnectionConfig::new().set_response_timeout(None);
        let mut conn = self
            .client
            .client()
            .get_multiplexed_async_connection_with_config(&config)
            .await
            .map_err(Self::map_err)?;
        cmd.query_async(&mut conn).await.map_err(Self::map_err)
    }
}

/// Encode a value for writing.
pub(crate) fn encode<V: ToWire + ?Sized>(value: &V) -> AppResult<String> {
    Ok(codec::encode(value)?)
}

/// Encode every value, failing on the first error. At least one is required.
pub(crate) fn encode_all<V: ToWire>(values: &[V]) -> AppResult<Vec<String>> {
    if values.is_empty() {
        return Err(AppError::validation("At least one value is required"));
    }
    values.iter().map(|v| encode(v)).collect()
}

/// Decode an optional reply.
pub(crate) fn decode_opt<T: FromWire>(raw: Option<String>) -> AppResult<Option<T>> {
    raw.map(|text| codec::decode_value(&text))
        .transpose()
        .map_err(AppError::from)
}

/// Decode a list reply, failing fast.
pub(crate) fn decode_all<T: FromWire>(raw: Vec<String>) -> AppResult<Vec<T>> {
    Ok(codec::decode_array(&raw)?)
}

/// Decode a list of optional replies; missing or undecodable entries become `None`.
pub(crate) fn decode_each_lossy<T: FromWire>(raw: Vec<Option<String>>) -> Vec<Option<T>> {
    raw.into_iter()
        .map(|item| item.and_then(|text| codec::decode_value(&text).ok()))
        .collect()
}

/// Decode hash fields, skipping fields whose value does not decode.
pub(crate) fn decode_fields_lossy<T: FromWire>(raw: HashMap<String, String>) -> HashMap<String, T> {
    raw.into_iter()
        .filter_map(|(field, text)| codec::decode_value(&text).ok().map(|value| (field, value)))
        .collect()
}

/// Decode `(member, score)` pairs, failing fast.
pub(crate) fn decode_scored<T: FromWire>(raw: Vec<(String, f64)>) -> AppResult<Vec<(T, f64)>> {
    raw.into_iter()
        .map(|(member, score)| -> AppResult<(T, f64)> {
            Ok((codec::decode_value(&member)?, score))
        })
        .collect()
}

/// Whole milliseconds in `ttl`, saturating.
pub(crate) fn millis(ttl: std::time::Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use svckit_core::error::ErrorKind;

    use super::*;
    use crate::codec::Json;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_all_requires_values() {
        let err = encode_all::<i64>(&[]).expect_err("empty");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(encode_all(&[1i64, 2]).expect("encode"), texts(&["1", "2"]));
    }

    #[test]
    fn test_decode_opt() {
        assert_eq!(decode_opt::<i64>(None).expect("none"), None);
        assert_eq!(decode_opt::<i64>(Some("5".into())).expect("some"), Some(5));
        assert!(decode_opt::<i64>(Some(String::new())).is_err());
    }

    #[test]
    fn test_decode_each_lossy_maps_failures_to_none() {
        let raw = vec![Some("[1]".to_string()), None, Some("{".to_string())];
        let values = decode_each_lossy::<Json<Vec<i32>>>(raw);
        assert_eq!(values, vec![Some(Json(vec![1])), None, None]);

        let numbers = decode_each_lossy::<i64>(vec![Some("7".into()), Some("x".into())]);
        assert_eq!(numbers, vec![Some(7), Some(0)]);
    }

    #[test]
    fn test_decode_fields_lossy_skips_bad_fields() {
        let raw = HashMap::from([
            ("a".to_string(), "[1, 2]".to_string()),
            ("b".to_string(), "not json".to_string()),
        ]);
        let fields = decode_fields_lossy::<Json<Vec<i32>>>(raw);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["a"], Json(vec![1, 2]));
    }

    #[test]
    fn test_decode_all_fails_fast() {
        assert_eq!(
            decode_all::<i64>(texts(&["1", "2", "bad"])).expect("lenient"),
            vec![1, 2, 0]
        );
        let err = decode_all::<Json<Vec<i32>>>(texts(&["[1]", "{"])).expect_err("bad json");
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_decode_scored() {
        let raw = vec![("a".to_string(), 1.0), ("b".to_string(), 2.5)];
        assert_eq!(
            decode_scored::<String>(raw).expect("decode"),
            vec![("a".to_string(), 1.0), ("b".to_string(), 2.5)]
        );
        let raw = vec![("[1]".to_string(), 1.0), ("{".to_string(), 2.0)];
        assert!(decode_scored::<Json<Vec<i32>>>(raw).is_err());
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
