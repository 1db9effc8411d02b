//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod create_item;
mod delete_item;
mod stream_updates;

pub use create_item::{CreateItemCommand, CreateItemHandler};
pub use delete_item::DeleteItemHandler;
pub use stream_updates::StreamUpdatesHandler;
