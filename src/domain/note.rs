//! Note aggregate root

use chrono::{DateTime, Utc};

use super::item::NoteItem;
use super::{new_id, now_millis};

/// A top-level document made of ordered items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<NoteItem>,
}

impl Note {
    /// Create an unsaved note with a fresh client-side id
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(new_id(), title)
    }

    /// Create an unsaved note with a caller-chosen id
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = now_millis();
        Note {
            id: id.into(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }

    /// Append an item, attaching it to this note
    pub fn push(&mut self, mut item: NoteItem) -> &NoteItem {
        item.note_id = self.id.clone();
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    pub fn item(&self, item_id: &str) -> Option<&NoteItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Items newest first, the way a detail view shows them
    pub fn items_newest_first(&self) -> impl Iterator<Item = &NoteItem> {
        self.items.iter().rev()
    }
}
