//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes and handlers
//! - `memory` - In-memory store and transport for tests and local runs
//! - `postgres` - PostgreSQL item store
//! - `redis` - Redis pubsub transport

pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis;
