//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `item` - The to-do item entity and its limits
//! - `event` - Domain events emitted when the list changes
//! - `error` - Errors shared by handlers and storage adapters

mod error;
mod event;
mod item;

pub use error::TodoError;
pub use event::ItemEvent;
pub use item::{Item, MAX_TEXT_LEN};
