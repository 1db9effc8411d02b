//! Create a to-do item and announce it on the transport.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::domain::{Item, ItemEvent, TodoError, MAX_TEXT_LEN};
use crate::live::{encode_event, ItemRenderer};
use crate::ports::{ItemStore, PubSubTransport};

pub struct CreateItemCommand {
    pub text: String,
}

pub struct CreateItemHandler {
    store: Arc<dyn ItemStore>,
    transport: Arc<dyn PubSubTransport>,
    renderer: Arc<dyn ItemRenderer>,
    channel: String,
}

impl CreateItemHandler {
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

    pub async fn handle(&self, command: CreateItemCommand) -> Result<Item, TodoError> {
        // 1. Validate the text
        let text = command.text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(TodoError::TextTooLong);
        }

        // 2. Persist the item
        let item = self.store.insert(text).await?;

        // 3. Announce the creation (publish failures are logged, never returned)
        let event = encode_event(
            &ItemEvent::Created(item.clone()),
            self.renderer.as_ref(),
            Utc::now().timestamp_millis(),
        );
        if let Err(e) = self.transport.publish(&self.channel, &event.to_frame()).await {
            warn!(item_id = item.id, error = %e, "failed to publish create event");
        }

        Ok(item)
    }
}
