//! In-memory pubsub transport for tests and single-instance runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast;

use crate::ports::{PubSubTransport, TransportError};

const CHANNEL_CAPACITY: usize = 128;

/// Broadcast-channel transport with the same semantics as a real pubsub
/// system: subscribers only see messages published after they joined,
/// and a subscription stream ends when the transport is dropped.
pub struct InMemoryPubSub {
    channels: Mutex<HashMap<String, broadcast::Sender<String>>>,
    published: Mutex<Vec<(String, String)>>,
}

impl InMemoryPubSub {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            published: Mutex::new(Vec::new()),
        }
    }

    fn sender_for(&self, channel: &str) -> broadcast::Sender<String> {
        self.channels
            .lock()
            .expect("InMemoryPubSub: channels lock poisoned")
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }

    /// All `(channel, message)` pairs published so far (test helper).
    pub fn published(&self) -> Vec<(String, String)> {
        self.published
            .lock()
            .expect("InMemoryPubSub: published lock poisoned")
            .clone()
    }

    pub fn message_count(&self) -> usize {
        self.published
            .lock()
            .expect("InMemoryPubSub: published lock poisoned")
            .len()
    }
}

impl Default for InMemoryPubSub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PubSubTransport for InMemoryPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), TransportError> {
        let sender = self.sender_for(channel);
        self.published
            .lock()
            .expect("InMemoryPubSub: published lock poisoned")
            .push((channel.to_string(), message.to_string()));
        // Ignore send errors (no receivers is OK)
        let _ = sender.send(message.to_string());
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<BoxStream<'static, String>, TransportError> {
        let receiver = self.sender_for(channel).subscribe();
        Ok(stream::unfold(receiver, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(message) => return Some((message, rx)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_messages_to_subscribers() {
        let pubsub = InMemoryPubSub::new();
        let mut messages = pubsub.subscribe("todo_events").await.unwrap();

        pubsub.publish("todo_events", "hello").await.unwrap();

        assert_eq!(messages.next().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_message() {
        let pubsub = InMemoryPubSub::new();
        let mut first = pubsub.subscribe("todo_events").await.unwrap();
        let mut second = pubsub.subscribe("todo_events").await.unwrap();

        pubsub.publish("todo_events", "hello").await.unwrap();

        assert_eq!(first.next().await.unwrap(), "hello");
        assert_eq!(second.next().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn channels_are_isolated() {
        let pubsub = InMemoryPubSub::new();
        let mut other = pubsub.subscribe("other").await.unwrap();

        pubsub.publish("todo_events", "hello").await.unwrap();
        pubsub.publish("other", "world").await.unwrap();

        assert_eq!(other.next().await.unwrap(), "world");
    }

    #[tokio::test]
    async fn records_published_messages() {
        let pubsub = InMemoryPubSub::new();

        pubsub.publish("todo_events", "one").await.unwrap();
        pubsub.publish("todo_events", "two").await.unwrap();

        assert_eq!(pubsub.message_count(), 2);
        assert_eq!(
            pubsub.published(),
            vec![
                ("todo_events".to_string(), "one".to_string()),
                ("todo_events".to_string(), "two".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn publishing_without_subscribers_succeeds() {
        let pubsub = InMemoryPubSub::new();
        pubsub.publish("todo_events", "nobody home").await.unwrap();
        assert_eq!(pubsub.message_count(), 1);
    }
}
