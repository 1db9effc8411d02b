//! Domain events emitted when the to-do list changes.

use super::item::Item;

/// A change to the to-do list.
///
/// `Updated` is part of the vocabulary so downstream consumers can handle
/// it, though the current handlers only produce `Created` and `Deleted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Created(Item),
    Updated(Item),
    Deleted { id: i64 },
}

impl ItemEvent {
    /// Id of the item this event concerns.
    pub fn item_id(&self) -> i64 {
        match self {
            ItemEvent::Created(item) | ItemEvent::Updated(item) => item.id,
            ItemEvent::Deleted { id } => *id,
        }
    }
}
