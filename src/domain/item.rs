//! Core to-do item entity.

/// Maximum number of characters accepted for an item's text.
pub const MAX_TEXT_LEN: usize = 500;

/// A single to-do item.
///
/// The `text` field holds the raw text as entered by the user. Escaping
/// for a particular output format (HTML, SSE payloads) is the job of the
/// rendering layer, not the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub text: String,
}

impl Item {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
