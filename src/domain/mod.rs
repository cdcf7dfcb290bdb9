//! Domain layer - Notes and their content blocks

pub mod item;
pub mod note;

pub use item::{ItemContent, ItemKind, NoteItem};
pub use note::Note;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a client-side unique id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time truncated to milliseconds, the storage resolution
pub fn now_millis() -> DateTime<Utc> {
    from_millis(Utc::now().timestamp_millis())
}

/// Convert stored Unix milliseconds back to a timestamp
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
