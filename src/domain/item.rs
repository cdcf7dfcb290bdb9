//! Note items: typed content blocks owned by a note

use chrono::{DateTime, Utc};
use std::fmt;

use super::{new_id, now_millis};

/// The three kinds of content block a note can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Text,
    Image,
    Audio,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Audio => "audio",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific payload of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    Text { body: String },
    /// Link to binary content kept outside the database (path or URI)
    Image { link: String },
    Audio { link: String, duration_secs: u32 },
}

impl ItemContent {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemContent::Text { .. } => ItemKind::Text,
            ItemContent::Image { .. } => ItemKind::Image,
            ItemContent::Audio { .. } => ItemKind::Audio,
        }
    }
}

/// A content block belonging to exactly one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    /// Back reference to the owning note, stamped on save
    pub note_id: String,
    pub created_at: DateTime<Utc>,
    pub content: ItemContent,
}

impl NoteItem {
    /// Create a detached item timestamped now
    pub fn new(content: ItemContent) -> Self {
        Self::new_at(content, now_millis())
    }

    /// Create a detached item with an explicit creation time
    pub fn new_at(content: ItemContent, created_at: DateTime<Utc>) -> Self {
        NoteItem {
            id: new_id(),
            note_id: String::new(),
            created_at,
            content,
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::new(ItemContent::Text { body: body.into() })
    }

    pub fn image(link: impl Into<String>) -> Self {
        Self::new(ItemContent::Image { link: link.into() })
    }

    pub fn audio(link: impl Into<String>, duration_secs: u32) -> Self {
        Self::new(ItemContent::Audio {
            link: link.into(),
            duration_secs,
        })
    }

    pub fn kind(&self) -> ItemKind {
        self.content.kind()
    }

    /// Short one-line rendering used by listings
    pub fn summary(&self) -> String {
        match &self.content {
            ItemContent::Text { body } => body.clone(),
            ItemContent::Image { link } => link.clone(),
            ItemContent::Audio {
                link,
                duration_secs,
            } => format!("{} ({}s)", link, duration_secs),
        }
    }
}
