//! Todo Live - Reactive to-do list with live SSE fan-out
//!
//! Every change to the list is published on a shared pubsub channel and
//! relayed to all connected browsers as server-sent events, so each
//! running instance shows the same list in real time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod live;
pub mod ports;
