//! PostgreSQL adapters - Database implementations for repository ports.

mod item_store;

pub use item_store::{ensure_schema, PostgresItemStore};
