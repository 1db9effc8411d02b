//! Redis-backed pubsub transport.

use std::fmt;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tracing::debug;

use crate::ports::{PubSubTransport, TransportError};

/// Transport over Redis PUBLISH/SUBSCRIBE.
///
/// Publishing reuses one multiplexed connection. Every subscription
/// opens its own connection, as Redis dedicates a connection to
/// SUBSCRIBE mode.
#[derive(Clone)]
pub struct RedisPubSubTransport {
    client: Client,
    connection: MultiplexedConnection,
}

impl RedisPubSubTransport {
    /// Connect to Redis at `url`. Connection problems surface here, at
    /// startup, rather than on the first publish.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let client = Client::open(url)
            .map_err(|e| TransportError::Unavailable(format!("invalid Redis URL: {}", e)))?;
        let connection = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| {
                TransportError::Unavailable(format!("Failed to connect to Redis: {}", e))
            })?;

        Ok(Self { client, connection })
    }
}

impl fmt::Debug for RedisPubSubTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisPubSubTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl PubSubTransport for RedisPubSubTransport {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), TransportError> {
        let mut connection = self.connection.clone();
        connection
            .publish::<_, _, ()>(channel, message)
            .await
            .map_err(|e| TransportError::Unavailable(format!("Failed to publish: {}", e)))
    }

    async fn subscribe(&self, channel: &str) -> Result<BoxStream<'static, String>, TransportError> {
        let connection = self.client.get_async_connection().await.map_err(|e| {
            TransportError::Unavailable(format!("Failed to open subscriber connection: {}", e))
        })?;
        let mut pubsub = connection.into_pubsub();
        pubsub
            .subscribe(channel)
            .await
            .map_err(|e| TransportError::Unavailable(format!("Failed to subscribe: {}", e)))?;

        Ok(pubsub
            .into_on_message()
            .filter_map(|msg| async move {
                match msg.get_payload::<String>() {
                    Ok(payload) => Some(payload),
                    Err(e) => {
                        debug!(error = %e, "dropping non-text transport message");
                        None
                    }
                }
            })
            .boxed())
    }
}
