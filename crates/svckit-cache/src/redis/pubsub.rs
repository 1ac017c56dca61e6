//! Publish/subscribe. Channels are not keys and are not namespaced.

use futures::StreamExt;
use redis::AsyncCommands;
use redis::aio::PubSub;
use tracing::debug;

use svckit_core::error::AppError;
use svckit_core::result::AppResult;

use crate::codec::{self, CodecError, FromWire, ToWire};

use super::store::{RedisStore, encode};

/// A message received on a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Channel the message was published on.
    pub channel: String,
    /// Encoded payload.
    pub payload: String,
}

impl Message {
    /// Decode the payload.
    pub fn decode<T: FromWire>(&self) -> AppResult<T> {
        Ok(codec::decode_value(&self.payload)?)
    }
}

/// A dedicated pub/sub connection.
pub struct Subscription {
    pubsub: PubSub,
}

impl Subscription {
    /// Wait for the next message. `None` once the connection is closed.
    pub async fn next_message(&mut self) -> AppResult<Option<Message>> {
        let Some(msg) = self.pubsub.on_message().next().await else {
            return Ok(None);
        };
        let payload = std::str::from_utf8(msg.get_payload_bytes()).map_err(CodecError::from)?;
        Ok(Some(Message {
            channel: msg.get_channel_name().to_string(),
            payload: payload.to_string(),
        }))
    }

    /// Wait for the next message and decode its payload.
    pub async fn next_value<T: FromWire>(&mut self) -> AppResult<Option<T>> {
        match self.next_message().await? {
            Some(message) => message.decode().map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Publish an encoded value. Returns the number of receivers.
    pub async fn publish<V: ToWire + ?Sized>(&self, channel: &str, value: &V) -> AppResult<u64> {
        let payload = encode(value)?;
        let mut conn = self.conn();
        conn.publish(channel, payload).await.map_err(Self::map_err)
    }

    /// Subscribe to channels on a new connection.
    pub async fn subscribe<C: AsRef<str>>(&self, channels: &[C]) -> AppResult<Subscription> {
        let channels = non_empty(channels)?;
        let mut pubsub = self.open_pubsub().await?;
        pubsub.subscribe(&channels).await.map_err(Self::map_err)?;
        debug!(?channels, "Subscribed");
        Ok(Subscription { pubsub })
    }

    /// Subscribe to channel patterns on a new connection.
    pub async fn psubscribe<C: AsRef<str>>(&self, patterns: &[C]) -> AppResult<Subscription> {
        let patterns = non_empty(patterns)?;
        let mut pubsub = self.open_pubsub().await?;
        pubsub.psubscribe(&patterns).await.map_err(Self::map_err)?;
        debug!(?patterns, "Pattern subscribed");
        Ok(Subscription { pubsub })
    }

    async fn open_pubsub(&self) -> AppResult<PubSub> {
        self.client()
            .client()
            .get_async_pubsub()
            .await
            .map_err(Self::map_err)
    }
}

fn non_empty<C: AsRef<str>>(channels: &[C]) -> AppResult<Vec<&str>> {
    if channels.is_empty() {
        return Err(AppError::validation("At least one channel is required"));
    }
    Ok(channels.iter().map(AsRef::as_ref).collect())
}
