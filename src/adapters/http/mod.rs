//! HTTP adapters - REST API implementations.

pub mod todo;

// Re-export key types for convenience
pub use todo::todo_routes;
pub use todo::TodoAppState;
