//! Errors shared by the to-do handlers and storage adapters.

use thiserror::Error;

use super::item::MAX_TEXT_LEN;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("to-do item not found: {0}")]
    NotFound(i64),

    #[error("item text must not be empty")]
    EmptyText,

    #[error("item text exceeds {max} characters", max = MAX_TEXT_LEN)]
    TextTooLong,

    #[error("store error: {0}")]
    Store(String),
}

impl TodoError {
    pub fn store(message: impl Into<String>) -> Self {
        TodoError::Store(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }
}
