//! Live update pipeline: wire codec, in-process fan-out, and
//! snapshot-merged subscriber feeds.

mod broadcaster;
mod feed;
mod wire;

pub use broadcaster::UpdateBroadcaster;
pub use feed::snapshot_then_live;
pub use wire::{encode_event, encode_snapshot_item, EventKind, ItemRenderer, WireEvent};
