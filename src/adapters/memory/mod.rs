//! In-memory adapters used by tests and local development.

mod item_store;
mod pubsub;

pub use item_store::InMemoryItemStore;
pub use pubsub::InMemoryPubSub;
