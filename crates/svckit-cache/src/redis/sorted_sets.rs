//! Sorted set commands.
//!
//! Score and lex bounds are passed through as Redis syntax, e.g. `"-inf"`,
//! `"(5"`, `"[a"`, `"+"`.

use redis::AsyncCommands;

use svckit_core::error::AppError;
use svckit_core::result::AppResult;

use crate::codec::{FromWire, ToWire};

use super::store::{RedisStore, decode_all, decode_scored, encode, encode_all};

impl RedisStore {
    /// Add members with their scores. Returns how many were new.
    pub async fn zadd<V: ToWire>(&self, key: &str, members: &[(V, f64)]) -> AppResult<u64> {
        if members.is_empty() {
            return Err(AppError::validation("At least one member is required"));
        }
        let key = self.key(key)?;
        let mut items: Vec<(f64, String)> = Vec::with_capacity(members.len());
        for (member, score) in members {
            items.push((*score, encode(member)?));
        }
        let mut conn = self.conn();
        conn.zadd_multiple(&key, items.as_slice())
            .await
            .map_err(Self::map_err)
    }

    /// Number of members.
    pub async fn zcard(&self, key: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.zcard(&key).await.map_err(Self::map_err)
    }

    /// Number of members with a score between `min` and `max`.
    pub async fn zcount(&self, key: &str, min: &str, max: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.zcount(&key, min, max).await.map_err(Self::map_err)
    }

    /// Score of `member`.
    pub async fn zscore<V: ToWire + ?Sized>(&self, key: &str, member: &V) -> AppResult<Option<f64>> {
        let key = self.key(key)?;
        let member = encode(member)?;
        let mut conn = self.conn();
        conn.zscore(&key, member).await.map_err(Self::map_err)
    }

    /// Increment the score of `member`. Returns the new score.
    pub async fn zincr_by<V: ToWire + ?Sized>(&self, key: &str, member: &V, by: f64) -> AppResult<f64> {
        let key = self.key(key)?;
        let member = encode(member)?;
        let mut conn = self.conn();
        conn.zincr(&key, member, by).await.map_err(Self::map_err)
    }

    /// Store the intersection of `keys` in `destination`. Returns its size.
    pub async fn zinterstore<K: AsRef<str>>(&self, destination: &str, keys: &[K]) -> AppResult<u64> {
        let destination = self.key(destination)?;
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        conn.zinterstore(&destination, &keys)
            .await
            .map_err(Self::map_err)
    }

    /// Number of members between lex bounds `min` and `max`.
    pub async fn zlexcount(&self, key: &str, min: &str, max: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.zlexcount(&key, min, max).await.map_err(Self::map_err)
    }

    /// Members by rank, ascending.
    pub async fn zrange<T: FromWire>(&self, key: &str, start: i64, stop: i64) -> AppResult<Vec<T>> {
        let raw: Vec<String> = self
            .query(redis::cmd("ZRANGE").arg(self.key(key)?).arg(start).arg(stop))
            .await?;
        decode_all(raw)
    }

    /// Members and scores by rank, ascending.
    pub async fn zrange_with_scores<T: FromWire>(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> AppResult<Vec<(T, f64)>> {
        let raw: Vec<(String, f64)> = self
            .query(
                redis::cmd("ZRANGE")
                    .arg(self.key(key)?)
                    .arg(start)
                    .arg(stop)
                    .arg("WITHSCORES"),
            )
            .await?;
        decode_scored(raw)
    }

    /// Members between lex bounds.
    pub async fn zrange_by_lex<T: FromWire>(&self, key: &str, min: &str, max: &str) -> AppResult<Vec<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn
            .zrangebylex(&key, min, max)
            .await
            .map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Members with a score between `min` and `max`, ascending.
    pub async fn zrange_by_score<T: FromWire>(
        &self,
        key: &str,
        min: &str,
        max: &str,
    ) -> AppResult<Vec<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn
            .zrangebyscore(&key, min, max)
            .await
            .map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Members and scores with a score between `min` and `max`, ascending.
    pub async fn zrange_by_score_with_scores<T: FromWire>(
        &self,
        key: &str,
        min: &str,
        max: &str,
    ) -> AppResult<Vec<(T, f64)>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Vec<(String, f64)> = conn
            .zrangebyscore_withscores(&key, min, max)
            .await
            .map_err(Self::map_err)?;
        decode_scored(raw)
    }

    /// Ascending rank of `member`.
    pub async fn zrank<V: ToWire + ?Sized>(&self, key: &str, member: &V) -> AppResult<Option<u64>> {
        let key = self.key(key)?;
        let member = encode(member)?;
        let mut conn = self.conn();
        conn.zrank(&key, member).await.map_err(Self::map_err)
    }

    /// Descending rank of `member`.
    pub async fn zrevrank<V: ToWire + ?Sized>(&self, key: &str, member: &V) -> AppResult<Option<u64>> {
        let key = self.key(key)?;
        let member = encode(member)?;
        let mut conn = self.conn();
        conn.zrevrank(&key, member).await.map_err(Self::map_err)
    }

    /// Members by rank, descending.
    pub async fn zrevrange<T: FromWire>(&self, key: &str, start: i64, stop: i64) -> AppResult<Vec<T>> {
        let raw: Vec<String> = self
            .query(redis::cmd("ZREVRANGE").arg(self.key(key)?).arg(start).arg(stop))
            .await?;
        decode_all(raw)
    }

    /// Members and scores by rank, descending.
    pub async fn zrevrange_with_scores<T: FromWire>(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> AppResult<Vec<(T, f64)>> {
        let raw: Vec<(String, f64)> = self
            .query(
                redis::cmd("ZREVRANGE")
                    .arg(self.key(key)?)
                    .arg(start)
                    .arg(stop)
                    .arg("WITHSCORES"),
            )
            .await?;
        decode_scored(raw)
    }

    /// Members with a score between `max` and `min`, descending.
    pub async fn zrevrange_by_score<T: FromWire>(
        &self,
        key: &str,
        max: &str,
        min: &str,
    ) -> AppResult<Vec<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn
            .zrevrangebyscore(&key, max, min)
            .await
            .map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Remove members. Returns how many were removed.
    pub async fn zrem<V: ToWire>(&self, key: &str, members: &[V]) -> AppResult<u64> {
        let key = self.key(key)?;
        let members = encode_all(members)?;
        let mut conn = self.conn();
        conn.zrem(&key, members).await.map_err(Self::map_err)
    }

    /// Remove members between lex bounds.
    pub async fn zremrange_by_lex(&self, key: &str, min: &str, max: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.zrembylex(&key, min, max).await.map_err(Self::map_err)
    }

    /// Remove members by rank.
    pub async fn zremrange_by_rank(&self, key: &str, start: i64, stop: i64) -> AppResult<u64> {
        self.query(
            redis::cmd("ZREMRANGEBYRANK")
                .arg(self.key(key)?)
                .arg(start)
                .arg(stop),
        )
        .await
    }

    /// Remove members with a score between `min` and `max`.
    pub async fn zremrange_by_score(&self, key: &str, min: &str, max: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.zrembyscore(&key, min, max).await.map_err(Self::map_err)
    }

    /// Store the union of `keys` in `destination`. Returns its size.
    pub async fn zunionstore<K: AsRef<str>>(&self, destination: &str, keys: &[K]) -> AppResult<u64> {
        let destination = self.key(destination)?;
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        conn.zunionstore(&destination, &keys)
            .await
            .map_err(Self::map_err)
    }
}
