//! Port for the external publish/subscribe transport.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("pubsub transport unavailable: {0}")]
    Unavailable(String),
}

/// Message transport connecting every running instance of the app.
///
/// Payloads are opaque strings. The transport gives no delivery or
/// ordering guarantees beyond what the backing system provides, and a
/// subscription stream may end at any time; callers that need a durable
/// feed have to resubscribe.
#[async_trait]
pub trait PubSubTransport: Send + Sync {
    /// Publish one message to every current subscriber of `channel`.
    async fn publish(&self, channel: &str, message: &str) -> Result<(), TransportError>;

    /// Open a stream of raw messages published to `channel`.
    async fn subscribe(&self, channel: &str) -> Result<BoxStream<'static, String>, TransportError>;
}
