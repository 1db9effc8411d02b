//! In-memory item store for tests and local development.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Item, TodoError};
use crate::ports::ItemStore;

/// Vec-backed store with sequential id assignment.
pub struct InMemoryItemStore {
    items: Mutex<Vec<Item>>,
    next_id: AtomicI64,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored items (test helper).
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .expect("InMemoryItemStore: items lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn insert(&self, text: &str) -> Result<Item, TodoError> {
        let item = Item::new(self.next_id.fetch_add(1, Ordering::SeqCst), text);
        self.items
            .lock()
            .expect("InMemoryItemStore: items lock poisoned")
            .push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, TodoError> {
        Ok(self
            .items
            .lock()
            .expect("InMemoryItemStore: items lock poisoned")
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), TodoError> {
        let mut items = self
            .items
            .lock()
            .expect("InMemoryItemStore: items lock poisoned");
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(TodoError::NotFound(id));
        }
        Ok(())
    }

    async fn list_all_desc(&self) -> Result<Vec<Item>, TodoError> {
        let mut items = self
            .items
            .lock()
            .expect("InMemoryItemStore: items lock poisoned")
            .clone();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }
}
