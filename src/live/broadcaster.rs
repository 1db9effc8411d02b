//! In-process fan-out of wire events to SSE subscribers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::ports::PubSubTransport;

use super::wire::WireEvent;

/// Delay before reopening a transport subscription that ended or failed.
const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(1);

const DEFAULT_CAPACITY: usize = 128;

/// Fans transport messages out to every connected SSE subscriber.
///
/// Built on a tokio broadcast channel: each subscriber gets its own
/// bounded buffer, and publishing never waits for slow consumers. A
/// subscriber that falls behind is dropped from the feed (see
/// [`snapshot_then_live`](super::snapshot_then_live)) rather than
/// stalling everyone else.
pub struct UpdateBroadcaster {
    sender: broadcast::Sender<WireEvent>,
    relay: Mutex<Option<JoinHandle<()>>>,
}

impl UpdateBroadcaster {
    /// Create a broadcaster whose subscribers each buffer up to
    /// `capacity` events. Must be non-zero.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            relay: Mutex::new(None),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Open a new subscription. Events sent after this call are
    /// buffered for the receiver even before it is first polled.
    pub fn subscribe(&self) -> broadcast::Receiver<WireEvent> {
        self.sender.subscribe()
    }

    /// Number of currently open subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Feed one raw transport message into the fan-out.
    ///
    /// Blank and malformed messages are discarded.
    pub fn relay_raw(&self, raw: &str) {
        relay_into(&self.sender, raw);
    }

    /// Spawn the background task that drains `transport` into this
    /// broadcaster.
    ///
    /// The task resubscribes whenever the transport stream ends or the
    /// subscribe call fails, waiting [`RESUBSCRIBE_DELAY`] in between.
    /// Calling `start_relay` again replaces (and aborts) a previously
    /// started relay.
    pub fn start_relay(&self, transport: Arc<dyn PubSubTransport>, channel: &str) {
        let sender = self.sender.clone();
        let channel = channel.to_string();
        let handle = tokio::spawn(async move {
            loop {
                match transport.subscribe(&channel).await {
                    Ok(mut messages) => {
                        info!(channel = %channel, "relaying transport messages");
                        while let Some(raw) = messages.next().await {
                            relay_into(&sender, &raw);
                        }
                        warn!(channel = %channel, "transport subscription ended, resubscribing");
                    }
                    Err(e) => {
                        warn!(channel = %channel, error = %e, "transport subscribe failed, retrying");
                    }
                }
                tokio::time::sleep(RESUBSCRIBE_DELAY).await;
            }
        });

        let mut relay = self
            .relay
            .lock()
            .expect("UpdateBroadcaster: relay lock poisoned");
        if let Some(previous) = relay.replace(handle) {
            previous.abort();
        }
    }

    /// Stop the relay task if one is running.
    pub fn shutdown(&self) {
        let mut relay = self
            .relay
            .lock()
            .expect("UpdateBroadcaster: relay lock poisoned");
        if let Some(handle) = relay.take() {
            handle.abort();
        }
    }
}

impl Default for UpdateBroadcaster {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

fn relay_into(sender: &broadcast::Sender<WireEvent>, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    match WireEvent::parse(raw) {
        Some(event) => {
            // Ignore send errors (no receivers is OK)
            let _ = sender.send(event);
        }
        None => {
            debug!(message = raw, "dropping malformed transport message");
        }
    }
}
