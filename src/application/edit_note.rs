//! Note editing use case
//!
//! An editing session holds an in-memory copy of one note. Items are
//! appended to that copy and persisted together on `save`; deleting an
//! item goes to storage immediately and reloads the note.

use crate::domain::{ItemContent, Note, NoteItem};
use crate::error::{BlocknotesError, Result};
use crate::infrastructure::NoteStore;
use tracing::debug;

/// In-memory state of the note being edited
pub struct NoteSession<'a> {
    store: &'a mut NoteStore,
    note: Note,
}

impl<'a> NoteSession<'a> {
    /// Start editing a new, unsaved note
    pub fn create(store: &'a mut NoteStore, title: impl Into<String>) -> Self {
        NoteSession {
            store,
            note: Note::new(title),
        }
    }

    /// Start editing a stored note
    pub fn open(store: &'a mut NoteStore, note_id: &str) -> Result<Self> {
        let note = store
            .load_note(note_id)?
            .ok_or_else(|| BlocknotesError::NoteNotFound(note_id.to_string()))?;
        Ok(NoteSession { store, note })
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.note.title = title.into();
    }

    /// Append a text block, returning its id. Empty text is ignored.
    pub fn add_text(&mut self, body: impl Into<String>) -> Option<String> {
        let body = body.into();
        if body.trim().is_empty() {
            return None;
        }
        Some(self.push(ItemContent::Text { body }))
    }

    pub fn add_image(&mut self, link: impl Into<String>) -> String {
        self.push(ItemContent::Image { link: link.into() })
    }

    pub fn add_audio(&mut self, link: impl Into<String>, duration_secs: u32) -> String {
        self.push(ItemContent::Audio {
            link: link.into(),
            duration_secs,
        })
    }

    fn push(&mut self, content: ItemContent) -> String {
        let item = self.note.push(NoteItem::new(content));
        debug!(note = %item.note_id, item = %item.id, kind = %item.kind(), "appended item");
        item.id.clone()
    }

    /// Persist the note with all of its current items
    pub fn save(&mut self) -> Result<()> {
        self.store.save_note(&mut self.note)
    }

    /// Delete one item from storage, then reload the note.
    ///
    /// A note that was never saved has nothing to reload, so the item is
    /// only dropped from the in-memory copy.
    pub fn delete_item(&mut self, item_id: &str) -> Result<()> {
        let item = self
            .note
            .item(item_id)
            .cloned()
            .ok_or_else(|| BlocknotesError::ItemNotFound(item_id.to_string()))?;

        self.store.delete_item(&item)?;

        match self.store.load_note(&self.note.id)? {
            Some(reloaded) => self.note = reloaded,
            None => self.note.items.retain(|i| i.id != item_id),
        }
        Ok(())
    }
}
