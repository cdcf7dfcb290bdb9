//! Row records and per-table data access
//!
//! Each table exposes the same contract: insert (replace on conflict),
//! update, delete, lookup by id, and a full scan. The three item tables add
//! lookups keyed by the owning note. Every operation takes a plain
//! `&Connection`, so it runs the same inside a `Transaction`.

use crate::domain::{from_millis, ItemContent, Note, NoteItem};
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, ToSql};

/// Per-table data access
pub trait Table {
    type Row;

    const NAME: &'static str;

    /// Column names, `id` first
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self::Row>;

    /// Values in `COLUMNS` order
    fn values(row: &Self::Row) -> Vec<&dyn ToSql>;

    fn id(row: &Self::Row) -> &str;

    /// Insert a row, overwriting in place when the id already exists
    fn insert(conn: &Connection, row: &Self::Row) -> Result<String> {
        let placeholders: Vec<String> = (1..=Self::COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect();
        let assignments: Vec<String> = Self::COLUMNS[1..]
            .iter()
            .map(|col| format!("{col} = excluded.{col}"))
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
            Self::NAME,
            Self::COLUMNS.join(", "),
            placeholders.join(", "),
            assignments.join(", ")
        );

        conn.prepare_cached(&sql)?
            .execute(Self::values(row).as_slice())?;
        Ok(Self::id(row).to_string())
    }

    /// Update an existing row; returns false when no row has that id
    fn update(conn: &Connection, row: &Self::Row) -> Result<bool> {
        let assignments: Vec<String> = Self::COLUMNS[1..]
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 2))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?1",
            Self::NAME,
            assignments.join(", ")
        );

        let changed = conn
            .prepare_cached(&sql)?
            .execute(Self::values(row).as_slice())?;
        Ok(changed > 0)
    }

    fn delete(conn: &Connection, id: &str) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", Self::NAME);
        let changed = conn.prepare_cached(&sql)?.execute([id])?;
        Ok(changed > 0)
    }

    fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Self::Row>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?1",
            Self::COLUMNS.join(", "),
            Self::NAME
        );
        Ok(conn
            .prepare_cached(&sql)?
            .query_row([id], Self::from_row)
            .optional()?)
    }

    fn get_all(conn: &Connection) -> Result<Vec<Self::Row>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at, rowid",
            Self::COLUMNS.join(", "),
            Self::NAME
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map([], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn count(conn: &Connection) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", Self::NAME);
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Tables whose rows belong to a note
pub trait ItemTable: Table {
    fn get_by_note(conn: &Connection, note_id: &str) -> Result<Vec<Self::Row>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE note_id = ?1 ORDER BY created_at, rowid",
            Self::COLUMNS.join(", "),
            Self::NAME
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map([note_id], Self::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn delete_by_note(conn: &Connection, note_id: &str) -> Result<usize> {
        let sql = format!("DELETE FROM {} WHERE note_id = ?1", Self::NAME);
        Ok(conn.prepare_cached(&sql)?.execute([note_id])?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItemRow {
    pub id: String,
    pub note_id: String,
    pub created_at: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItemRow {
    pub id: String,
    pub note_id: String,
    pub created_at: i64,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioItemRow {
    pub id: String,
    pub note_id: String,
    pub created_at: i64,
    pub link: String,
    pub duration_secs: u32,
}

pub struct NotesTable;
pub struct TextItemsTable;
pub struct ImageItemsTable;
pub struct AudioItemsTable;

impl Table for NotesTable {
    type Row = NoteRow;

    const NAME: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &["id", "title", "created_at", "updated_at"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<NoteRow> {
        Ok(NoteRow {
            id: row.get(0)?,
            title: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }

    fn values(row: &NoteRow) -> Vec<&dyn ToSql> {
        vec![&row.id as &dyn ToSql, &row.title, &row.created_at, &row.updated_at]
    }

    fn id(row: &NoteRow) -> &str {
        &row.id
    }
}

impl Table for TextItemsTable {
    type Row = TextItemRow;

    const NAME: &'static str = "text_items";
    const COLUMNS: &'static [&'static str] = &["id", "note_id", "created_at", "content"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<TextItemRow> {
        Ok(TextItemRow {
            id: row.get(0)?,
            note_id: row.get(1)?,
            created_at: row.get(2)?,
            content: row.get(3)?,
        })
    }

    fn values(row: &TextItemRow) -> Vec<&dyn ToSql> {
        vec![&row.id as &dyn ToSql, &row.note_id, &row.created_at, &row.content]
    }

    fn id(row: &TextItemRow) -> &str {
        &row.id
    }
}

impl ItemTable for TextItemsTable {}

impl Table for ImageItemsTable {
    type Row = ImageItemRow;

    const NAME: &'static str = "image_items";
    const COLUMNS: &'static [&'static str] = &["id", "note_id", "created_at", "link"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<ImageItemRow> {
        Ok(ImageItemRow {
            id: row.get(0)?,
            note_id: row.get(1)?,
            created_at: row.get(2)?,
            link: row.get(3)?,
        })
    }

    fn values(row: &ImageItemRow) -> Vec<&dyn ToSql> {
        vec![&row.id as &dyn ToSql, &row.note_id, &row.created_at, &row.link]
    }

    fn id(row: &ImageItemRow) -> &str {
        &row.id
    }
}

impl ItemTable for ImageItemsTable {}

impl Table for AudioItemsTable {
    type Row = AudioItemRow;

    const NAME: &'static str = "audio_items";
    const COLUMNS: &'static [&'static str] =
        &["id", "note_id", "created_at", "link", "duration_secs"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<AudioItemRow> {
        Ok(AudioItemRow {
            id: row.get(0)?,
            note_id: row.get(1)?,
            created_at: row.get(2)?,
            link: row.get(3)?,
            duration_secs: row.get(4)?,
        })
    }

    fn values(row: &AudioItemRow) -> Vec<&dyn ToSql> {
        vec![
            &row.id as &dyn ToSql,
            &row.note_id,
            &row.created_at,
            &row.link,
            &row.duration_secs,
        ]
    }

    fn id(row: &AudioItemRow) -> &str {
        &row.id
    }
}

impl ItemTable for AudioItemsTable {}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        NoteRow {
            id: note.id.clone(),
            title: note.title.clone(),
            created_at: note.created_at.timestamp_millis(),
            updated_at: note.updated_at.timestamp_millis(),
        }
    }
}

impl NoteRow {
    /// Rebuild a note from its row and already-ordered items
    pub fn into_note(self, items: Vec<NoteItem>) -> Note {
        Note {
            id: self.id,
            title: self.title,
            created_at: from_millis(self.created_at),
            updated_at: from_millis(self.updated_at),
            items,
        }
    }
}

/// A row from any of the item tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRow {
    Text(TextItemRow),
    Image(ImageItemRow),
    Audio(AudioItemRow),
}

impl ItemRow {
    /// Insert into the table matching the variant. A row with the same id
    /// in either of the other item tables is removed, so an item that
    /// changed variant never appears twice.
    pub fn insert(&self, conn: &Connection) -> Result<String> {
        match self {
            ItemRow::Text(row) => {
                ImageItemsTable::delete(conn, &row.id)?;
                AudioItemsTable::delete(conn, &row.id)?;
                TextItemsTable::insert(conn, row)
            }
            ItemRow::Image(row) => {
                TextItemsTable::delete(conn, &row.id)?;
                AudioItemsTable::delete(conn, &row.id)?;
                ImageItemsTable::insert(conn, row)
            }
            ItemRow::Audio(row) => {
                TextItemsTable::delete(conn, &row.id)?;
                ImageItemsTable::delete(conn, &row.id)?;
                AudioItemsTable::insert(conn, row)
            }
        }
    }

    pub fn into_item(self) -> NoteItem {
        match self {
            ItemRow::Text(row) => NoteItem {
                id: row.id,
                note_id: row.note_id,
                created_at: from_millis(row.created_at),
                content: ItemContent::Text { body: row.content },
            },
            ItemRow::Image(row) => NoteItem {
                id: row.id,
                note_id: row.note_id,
                created_at: from_millis(row.created_at),
                content: ItemContent::Image { link: row.link },
            },
            ItemRow::Audio(row) => NoteItem {
                id: row.id,
                note_id: row.note_id,
                created_at: from_millis(row.created_at),
                content: ItemContent::Audio {
                    link: row.link,
                    duration_secs: row.duration_secs,
                },
            },
        }
    }
}

impl From<&NoteItem> for ItemRow {
    fn from(item: &NoteItem) -> Self {
        let id = item.id.clone();
        let note_id = item.note_id.clone();
        let created_at = item.created_at.timestamp_millis();

        match &item.content {
            ItemContent::Text { body } => ItemRow::Text(TextItemRow {
                id,
                note_id,
                created_at,
                content: body.clone(),
            }),
            ItemContent::Image { link } => ItemRow::Image(ImageItemRow {
                id,
                note_id,
                created_at,
                link: link.clone(),
            }),
            ItemContent::Audio {
                link,
                duration_secs,
            } => ItemRow::Audio(AudioItemRow {
                id,
                note_id,
                created_at,
                link: link.clone(),
                duration_secs: *duration_secs,
            }),
        }
    }
}
