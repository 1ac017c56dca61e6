//! Set commands. Every key of a multi-key command is namespaced.

use redis::AsyncCommands;

use svckit_core::result::AppResult;

use crate::codec::{FromWire, ToWire};

use super::store::{RedisStore, decode_all, decode_opt, encode, encode_all};

impl RedisStore {
    /// Add members. Returns how many were new.
    pub async fn sadd<V: ToWire>(&self, key: &str, members: &[V]) -> AppResult<u64> {
        let key = self.key(key)?;
        let members = encode_all(members)?;
        let mut conn = self.conn();
        conn.sadd(&key, members).await.map_err(Self::map_err)
    }

    /// Number of members.
    pub async fn scard(&self, key: &str) -> AppResult<u64> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        conn.scard(&key).await.map_err(Self::map_err)
    }

    /// Members of the first set absent from the others.
    pub async fn sdiff<T: FromWire, K: AsRef<str>>(&self, keys: &[K]) -> AppResult<Vec<T>> {
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn.sdiff(&keys).await.map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Store the difference in `destination`. Returns its size.
    pub async fn sdiffstore<K: AsRef<str>>(&self, destination: &str, keys: &[K]) -> AppResult<u64> {
        let destination = self.key(destination)?;
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        conn.sdiffstore(&destination, &keys)
            .await
            .map_err(Self::map_err)
    }

    /// Members present in every set.
    pub async fn sinter<T: FromWire, K: AsRef<str>>(&self, keys: &[K]) -> AppResult<Vec<T>> {
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn.sinter(&keys).await.map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Store the intersection in `destination`. Returns its size.
    pub async fn sinterstore<K: AsRef<str>>(&self, destination: &str, keys: &[K]) -> AppResult<u64> {
        let destination = self.key(destination)?;
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        conn.sinterstore(&destination, &keys)
            .await
            .map_err(Self::map_err)
    }

    /// Whether `member` is in the set.
    pub async fn sismember<V: ToWire + ?Sized>(&self, key: &str, member: &V) -> AppResult<bool> {
        let key = self.key(key)?;
        let member = encode(member)?;
        let mut conn = self.conn();
        conn.sismember(&key, member).await.map_err(Self::map_err)
    }

    /// Every member. Fails on the first member that does not decode.
    pub async fn smembers<T: FromWire>(&self, key: &str) -> AppResult<Vec<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn.smembers(&key).await.map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Move `member` from `source` to `destination`. Returns whether it moved.
    pub async fn smove<V: ToWire + ?Sized>(
        &self,
        source: &str,
        destination: &str,
        member: &V,
    ) -> AppResult<bool> {
        let source = self.key(source)?;
        let destination = self.key(destination)?;
        let member = encode(member)?;
        let mut conn = self.conn();
        conn.smove(&source, &destination, member)
            .await
            .map_err(Self::map_err)
    }

    /// Remove and return a random member.
    pub async fn spop<T: FromWire>(&self, key: &str) -> AppResult<Option<T>> {
        let key = self.key(key)?;
        let mut conn = self.conn();
        let raw: Option<String> = conn.spop(&key).await.map_err(Self::map_err)?;
        decode_opt(raw)
    }

    /// Up to `count` random members. A negative count allows repeats.
    pub async fn srandmember<T: FromWire>(&self, key: &str, count: i64) -> AppResult<Vec<T>> {
        let raw: Vec<String> = self
            .query(redis::cmd("SRANDMEMBER").arg(self.key(key)?).arg(count))
            .await?;
        decode_all(raw)
    }

    /// Remove members. Returns how many were removed.
    pub async fn srem<V: ToWire>(&self, key: &str, members: &[V]) -> AppResult<u64> {
        let key = self.key(key)?;
        let members = encode_all(members)?;
        let mut conn = self.conn();
        conn.srem(&key, members).await.map_err(Self::map_err)
    }

    /// Members of any set.
    pub async fn sunion<T: FromWire, K: AsRef<str>>(&self, keys: &[K]) -> AppResult<Vec<T>> {
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        let raw: Vec<String> = conn.sunion(&keys).await.map_err(Self::map_err)?;
        decode_all(raw)
    }

    /// Store the union in `destination`. Returns its size.
    pub async fn sunionstore<K: AsRef<str>>(&self, destination: &str, keys: &[K]) -> AppResult<u64> {
        let destination = self.key(destination)?;
        let keys = self.keys(keys)?;
        let mut conn = self.conn();
        conn.sunionstore(&destination, &keys)
            .await
            .map_err(Self::map_err)
    }
}
