//! # svckit-cache
//!
//! Everything between typed application values and Redis:
//!
//! - [`codec`]: converts values to and from the flat wire strings Redis stores
//! - [`keys`]: the `prefix:key` namespace applied to every key
//! - [`redis`]: a connection handle and typed wrappers over the string, hash,
//!   list, set, sorted-set, keyspace and pub/sub commands
//!
//! The codec and keys are always available; the Redis client sits behind the
//! `redis-backend` feature (enabled by default).

pub mod codec;
pub mod keys;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use codec::{CodecError, FromWire, Json, ToWire, Value, ValueKind};
pub use keys::KeyNamespace;
#[cfg(feature = "redis-backend")]
pub use crate::redis::{RedisClient, RedisStore};
