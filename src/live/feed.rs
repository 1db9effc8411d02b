//! Snapshot-merged event feeds for new subscribers.

use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast;
use tracing::warn;

use super::wire::WireEvent;

/// Replay `snapshot` first, then forward live events from `receiver`.
///
/// Callers must subscribe to the broadcaster *before* producing the
/// snapshot. An event published in between may then show up twice (in
/// the snapshot and again live), and re-rendering an existing item is
/// harmless; subscribing afterwards could instead lose a deletion for
/// good.
///
/// Events with empty data are skipped. The stream ends when the
/// broadcaster is dropped, or when this subscriber falls behind and its
/// buffer overflows. Ending on overflow lets the client reconnect for a
/// fresh snapshot instead of silently missing events; other subscribers
/// are unaffected.
pub fn snapshot_then_live(
    snapshot: Vec<WireEvent>,
    receiver: broadcast::Receiver<WireEvent>,
) -> impl Stream<Item = WireEvent> + Send {
    stream::iter(snapshot).chain(stream::unfold(receiver, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if event.data.is_empty() {
                        continue;
                    }
                    return Some((event, rx));
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "subscriber fell behind, closing its feed");
                    return None;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::EventKind;
    use futures::StreamExt;

    fn event(id: &str, data: &str) -> WireEvent {
        WireEvent {
            id: id.to_string(),
            kind: EventKind::Create,
            data: data.to_string(),
        }
    }

    #[tokio::test]
    async fn replays_snapshot_before_live_events() {
        let (tx, rx) = broadcast::channel(8);
        tx.send(event("global_3_1", "live")).unwrap();

        let snapshot = vec![event("init_2", "b"), event("init_1", "a")];
        let mut feed = Box::pin(snapshot_then_live(snapshot, rx));

        assert_eq!(feed.next().await.unwrap().id, "init_2");
        assert_eq!(feed.next().await.unwrap().id, "init_1");
        assert_eq!(feed.next().await.unwrap().id, "global_3_1");
    }

    #[tokio::test]
    async fn ends_when_broadcaster_is_dropped() {
        let (tx, rx) = broadcast::channel(8);
        drop(tx);

        let mut feed = Box::pin(snapshot_then_live(vec![event("init_1", "a")], rx));

        assert_eq!(feed.next().await.unwrap().id, "init_1");
        assert!(feed.next().await.is_none());
    }

    #[tokio::test]
    async fn skips_events_with_empty_data() {
        let (tx, rx) = broadcast::channel(8);
        tx.send(event("global_1_1", "")).unwrap();
        tx.send(event("global_2_2", "kept")).unwrap();
        drop(tx);

        let mut feed = Box::pin(snapshot_then_live(Vec::new(), rx));

        assert_eq!(feed.next().await.unwrap().id, "global_2_2");
        assert!(feed.next().await.is_none());
    }

    #[tokio::test]
    async fn closes_after_buffer_overflow() {
        let (tx, rx) = broadcast::channel(2);
        for i in 0..5 {
            tx.send(event(&format!("global_{}_1", i), "x")).unwrap();
        }

        let mut feed = Box::pin(snapshot_then_live(Vec::new(), rx));

        // The receiver lagged before its first poll, so the feed closes
        // without yielding any live event.
        assert!(feed.next().await.is_none());
    }
}
