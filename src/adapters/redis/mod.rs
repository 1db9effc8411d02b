//! Redis adapters.

mod transport;

pub use transport::RedisPubSubTransport;
