//! Delete a to-do item and announce its removal.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::{ItemEvent, TodoError};
use crate::live::{encode_event, ItemRenderer};
use crate::ports::{ItemStore, PubSubTransport};

pub struct DeleteItemHandler {
    store: Arc<dyn ItemStore>,
    transport: Arc<dyn PubSubTransport>,
    renderer: Arc<dyn ItemRenderer>,
    channel: String,
}

impl DeleteItemHandler {
    pub fn new(
        store: Arc<dyn ItemStore>,
        transport: Arc<dyn PubSubTransport>,
        renderer: Arc<dyn ItemRenderer>,
        channel: String,
    ) -> Self {
        Self {
            store,
            transport,
            renderer,
            channel,
        }
    }

    /// Deleting an id that no longer exists is a success: the item is
    /// gone either way.
    pub async fn handle(&self, item_id: i64) -> Result<(), TodoError> {
        // 1. Look the item up
        let item = match self.store.find_by_id(item_id).await? {
            Some(item) => item,
            None => {
                debug!(item_id, "delete of unknown item ignored");
                return Ok(());
            }
        };

        // 2. Announce the deletion (publish failures are logged, never returned)
        let event = encode_event(
            &ItemEvent::Deleted { id: item.id },
            self.renderer.as_ref(),
            Utc::now().timestamp_millis(),
        );
        if let Err(e) = self.transport.publish(&self.channel, &event.to_frame()).await {
            warn!(item_id, error = %e, "failed to publish delete event");
        }

        // 3. Remove the row; losing a concurrent-delete race still counts
        match self.store.delete_by_id(item.id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }
}
