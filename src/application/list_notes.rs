//! List and remove notes use case

use crate::domain::Note;
use crate::error::{BlocknotesError, Result};
use crate::infrastructure::NoteStore;

/// All notes, most recently updated first.
pub fn list_notes(store: &NoteStore, limit: Option<usize>) -> Result<Vec<Note>> {
    let mut notes = store.load_all()?;
    if let Some(limit) = limit {
        notes.truncate(limit);
    }
    Ok(notes)
}

/// Remove a note together with its items.
pub fn remove_note(store: &mut NoteStore, note_id: &str) -> Result<()> {
    if store.delete_note(note_id)? {
        Ok(())
    } else {
        Err(BlocknotesError::NoteNotFound(note_id.to_string()))
    }
}
