//! Note repository: composes the four tables into note-level operations
//!
//! Saving fans a note out into the notes table and one item table per
//! variant; loading fans the rows back in and orders the items by creation
//! time. Multi-row writes run inside a single transaction.

use crate::domain::{now_millis, ItemKind, Note, NoteItem};
use crate::error::Result;
use crate::infrastructure::database::Database;
use crate::infrastructure::tables::{
    AudioItemsTable, ImageItemsTable, ItemRow, ItemTable, NoteRow, NotesTable, Table,
    TextItemsTable,
};
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Note-level persistence over a [`Database`]
#[derive(Debug)]
pub struct NoteStore {
    db: Database,
}

impl NoteStore {
    pub fn new(db: Database) -> Self {
        NoteStore { db }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Persist a note and all of its current items.
    ///
    /// Upserts the note and every item in one transaction. Stored items that
    /// are no longer in `note.items` are left untouched. Once committed, the
    /// new `updated_at` and the owning-note id are stamped onto `note`; a
    /// failed save leaves it as it was.
    pub fn save_note(&mut self, note: &mut Note) -> Result<()> {
        let mut stamped = note.clone();
        stamped.updated_at = now_millis();
        for item in &mut stamped.items {
            item.note_id = stamped.id.clone();
        }

        let tx = self.db.transaction()?;
        NotesTable::insert(&tx, &NoteRow::from(&stamped))?;
        for item in &stamped.items {
            ItemRow::from(item).insert(&tx)?;
        }
        tx.commit()?;

        *note = stamped;
        info!(note = %note.id, items = note.items.len(), "saved note");
        Ok(())
    }

    /// All notes with their items, most recently updated first
    pub fn load_all(&self) -> Result<Vec<Note>> {
        let conn = self.db.connection();

        let mut notes = NotesTable::get_all(conn)?
            .into_iter()
            .map(|row| -> Result<Note> {
                let items = load_items(conn, &row.id)?;
                Ok(row.into_note(items))
            })
            .collect::<Result<Vec<Note>>>()?;

        notes.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        debug!(count = notes.len(), "loaded notes");
        Ok(notes)
    }

    /// One note with its items, or `None` when no such note is stored
    pub fn load_note(&self, note_id: &str) -> Result<Option<Note>> {
        let conn = self.db.connection();

        let row = match NotesTable::get_by_id(conn, note_id)? {
            Some(row) => row,
            None => {
                debug!(note = note_id, "note not found");
                return Ok(None);
            }
        };

        let items = load_items(conn, &row.id)?;
        Ok(Some(row.into_note(items)))
    }

    /// Find one item of a note in whichever table holds it
    pub fn find_item(&self, note_id: &str, item_id: &str) -> Result<Option<NoteItem>> {
        let conn = self.db.connection();

        let row = if let Some(row) = TextItemsTable::get_by_id(conn, item_id)? {
            Some(ItemRow::Text(row))
        } else if let Some(row) = ImageItemsTable::get_by_id(conn, item_id)? {
            Some(ItemRow::Image(row))
        } else {
            AudioItemsTable::get_by_id(conn, item_id)?.map(ItemRow::Audio)
        };

        Ok(row
            .map(ItemRow::into_item)
            .filter(|item| item.note_id == note_id))
    }

    /// Delete a note and all of its items. Returns whether the note existed.
    pub fn delete_note(&mut self, note_id: &str) -> Result<bool> {
        let tx = self.db.transaction()?;
        let items = TextItemsTable::delete_by_note(&tx, note_id)?
            + ImageItemsTable::delete_by_note(&tx, note_id)?
            + AudioItemsTable::delete_by_note(&tx, note_id)?;
        let existed = NotesTable::delete(&tx, note_id)?;
        tx.commit()?;

        if existed {
            info!(note = note_id, items, "deleted note");
        }
        Ok(existed)
    }

    /// Delete a single item from the table matching its variant.
    ///
    /// The owning note is not reloaded; callers refresh their own copy.
    pub fn delete_item(&mut self, item: &NoteItem) -> Result<bool> {
        let conn = self.db.connection();
        let deleted = match item.kind() {
            ItemKind::Text => TextItemsTable::delete(conn, &item.id)?,
            ItemKind::Image => ImageItemsTable::delete(conn, &item.id)?,
            ItemKind::Audio => AudioItemsTable::delete(conn, &item.id)?,
        };

        debug!(item = %item.id, kind = %item.kind(), deleted, "deleted item");
        Ok(deleted)
    }

    /// Delete every note and item. Returns the number of notes removed.
    pub fn delete_all(&mut self) -> Result<usize> {
        let tx = self.db.transaction()?;
        let count = NotesTable::count(&tx)?;
        tx.execute_batch(
            "DELETE FROM text_items; DELETE FROM image_items; DELETE FROM audio_items; DELETE FROM notes;",
        )?;
        tx.commit()?;

        info!(count, "deleted all notes");
        Ok(count)
    }

    pub fn count_notes(&self) -> Result<usize> {
        NotesTable::count(self.db.connection())
    }
}

/// Fan-in: gather a note's items from every item table, oldest first
fn load_items(conn: &Connection, note_id: &str) -> Result<Vec<NoteItem>> {
    let mut items: Vec<NoteItem> = TextItemsTable::get_by_note(conn, note_id)?
        .into_iter()
        .map(|row| ItemRow::Text(row).into_item())
        .chain(
            ImageItemsTable::get_by_note(conn, note_id)?
                .into_iter()
                .map(|row| ItemRow::Image(row).into_item()),
        )
        .chain(
            AudioItemsTable::get_by_note(conn, note_id)?
                .into_iter()
                .map(|row| ItemRow::Audio(row).into_item()),
        )
        .collect();

    // Stable: equal timestamps keep text, image, audio order
    items.sort_by_key(|item| item.created_at);
    Ok(items)
}
