//! Port for persisting to-do items.

use async_trait::async_trait;

use crate::domain::{Item, TodoError};

/// Storage abstraction for to-do items.
///
/// Implementations assign ids on insert. `list_all_desc` returns items
/// newest-first, which is the order the snapshot replay relies on.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persist a new item and return it with its assigned id.
    async fn insert(&self, text: &str) -> Result<Item, TodoError>;

    /// Look up a single item. `None` when no item has that id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, TodoError>;

    /// Remove an item. Returns `TodoError::NotFound` when no row matched.
    async fn delete_by_id(&self, id: i64) -> Result<(), TodoError>;

    /// All items ordered by descending id (newest first).
    async fn list_all_desc(&self) -> Result<Vec<Item>, TodoError>;
}
