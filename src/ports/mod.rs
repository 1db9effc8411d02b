//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ItemStore` - Port for persisting to-do items
//! - `PubSubTransport` - Port for the cross-instance message transport

mod item_store;
mod pubsub;

pub use item_store::ItemStore;
pub use pubsub::{PubSubTransport, TransportError};
