//! Wire format for to-do update events.
//!
//! Every event travels as a complete server-sent-event frame, both over
//! the pubsub transport and down to browsers:
//!
//! ```text
//! id:<eventId>\nevent:<create|update|delete>\ndata:<payload>\n\n
//! ```
//!
//! Create and update events carry a rendered item as their payload,
//! delete events carry the bare item id. Live events get globally
//! unique ids of the form `global_<itemId>_<unixMillis>`, snapshot
//! replay events use `init_<itemId>`.

use std::fmt;

use crate::domain::{Item, ItemEvent};

/// Kind of a wire event, matching the SSE `event:` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Create,
    Update,
    Delete,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Update => "update",
            EventKind::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(EventKind::Create),
            "update" => Some(EventKind::Update),
            "delete" => Some(EventKind::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event as it travels between instances and out to SSE clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireEvent {
    pub id: String,
    pub kind: EventKind,
    pub data: String,
}

impl WireEvent {
    /// Serialize into the exact SSE frame, trailing blank line included.
    pub fn to_frame(&self) -> String {
        format!("id:{}\nevent:{}\ndata:{}\n\n", self.id, self.kind, self.data)
    }

    /// Parse a frame received from the transport.
    ///
    /// Returns `None` for anything that is not exactly an id line, an
    /// event line with a known kind, and a data line. The data may be
    /// empty, the id may not.
    pub fn parse(frame: &str) -> Option<Self> {
        let mut lines = frame.trim_end_matches('\n').lines();
        let id = lines.next()?.strip_prefix("id:")?;
        let kind = EventKind::parse(lines.next()?.strip_prefix("event:")?)?;
        let data = lines.next()?.strip_prefix("data:")?;
        if lines.next().is_some() || id.is_empty() {
            return None;
        }
        Some(WireEvent {
            id: id.to_string(),
            kind,
            data: data.to_string(),
        })
    }
}

/// Renders an item into the payload carried by create and update events.
///
/// Implementations must return a single line: the payload is embedded in
/// a `data:` field, so any newline would tear the frame apart.
pub trait ItemRenderer: Send + Sync {
    fn render(&self, item: &Item) -> String;
}

/// Encode a domain event for the live feed.
///
/// `now_millis` goes into the event id so replays of the same item at
/// different times stay distinguishable.
pub fn encode_event(event: &ItemEvent, renderer: &dyn ItemRenderer, now_millis: i64) -> WireEvent {
    let id = format!("global_{}_{}", event.item_id(), now_millis);
    match event {
        ItemEvent::Created(item) => WireEvent {
            id,
            kind: EventKind::Create,
            data: renderer.render(item),
        },
        ItemEvent::Updated(item) => WireEvent {
            id,
            kind: EventKind::Update,
            data: renderer.render(item),
        },
        ItemEvent::Deleted { id: item_id } => WireEvent {
            id,
            kind: EventKind::Delete,
            data: item_id.to_string(),
        },
    }
}

/// Encode an existing item for snapshot replay.
///
/// Snapshot events reuse the `create` kind so clients render them the
/// same way as live creations; the `init_` id prefix keeps them from
/// colliding with live event ids.
pub fn encode_snapshot_item(item: &Item, renderer: &dyn ItemRenderer) -> WireEvent {
    WireEvent {
        id: format!("init_{}", item.id),
        kind: EventKind::Create,
        data: renderer.render(item),
    }
}
