//! Open a subscriber feed: full snapshot first, live events after.

use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};

use crate::domain::TodoError;
use crate::live::{encode_snapshot_item, snapshot_then_live, ItemRenderer, UpdateBroadcaster, WireEvent};
use crate::ports::ItemStore;

pub struct StreamUpdatesHandler {
    store: Arc<dyn ItemStore>,
    broadcaster: Arc<UpdateBroadcaster>,
    renderer: Arc<dyn ItemRenderer>,
}

impl StreamUpdatesHandler {
    pub fn new(
        store: Arc<dyn ItemStore>,
        broadcaster: Arc<UpdateBroadcaster>,
        renderer: Arc<dyn ItemRenderer>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            renderer,
        }
    }

    pub async fn handle(&self) -> Result<BoxStream<'static, WireEvent>, TodoError> {
        // 1. Subscribe before reading the snapshot. An event published in
        //    between is then buffered and may appear twice, which clients
        //    absorb by re-rendering; the reverse order could drop it.
        let receiver = self.broadcaster.subscribe();

        // 2. Snapshot the current list, newest first
        let items = self.store.list_all_desc().await?;
        let snapshot: Vec<WireEvent> = items
            .iter()
            .map(|item| encode_snapshot_item(item, self.renderer.as_ref()))
            .collect();

        // 3. Replay the snapshot, then follow the live feed
        Ok(snapshot_then_live(snapshot, receiver).boxed())
    }
}
