//! Redis client and typed command wrappers.
//!
//! [`RedisStore`] methods are grouped by data type: keyspace, strings,
//! hashes, lists, sets, sorted sets, and pub/sub.

pub mod client;
pub mod hashes;
pub mod keyspace;
pub mod lists;
pub mod pubsub;
pub mod sets;
pub mod sorted_sets;
pub mod store;
pub mod strings;

pub use client::RedisClient;
pub use lists::InsertPosition;
pub use pubsub::{Message, Subscription};
pub use store::RedisStore;
