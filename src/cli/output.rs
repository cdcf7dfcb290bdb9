//! Output formatting utilities

use crate::domain::{ItemKind, Note};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a list of notes for display
pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for note in notes {
        output.push_str(&format!(
            "{}  {}  {} ({} {})\n",
            note.id,
            note.updated_at.format(TIME_FORMAT),
            display_title(note),
            note.items.len(),
            if note.items.len() == 1 { "item" } else { "items" }
        ));
    }
    output
}

/// Format one note with its items, newest first
pub fn format_note_detail(note: &Note) -> String {
    let mut output = format!("# {}\n", display_title(note));
    output.push_str(&format!("id: {}\n", note.id));
    output.push_str(&format!(
        "updated: {}\n\n",
        note.updated_at.format(TIME_FORMAT)
    ));

    if note.items.is_empty() {
        output.push_str("No items\n");
        return output;
    }

    for item in note.items_newest_first() {
        output.push_str(&format!(
            "{}  {}  [{}]  {}\n",
            item.id,
            item.created_at.format(TIME_FORMAT),
            kind_label(item.kind()),
            item.summary()
        ));
    }
    output
}

fn kind_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Text => "text ",
        ItemKind::Image => "image",
        ItemKind::Audio => "audio",
    }
}

fn display_title(note: &Note) -> &str {
    if note.title.trim().is_empty() {
        "(untitled)"
    } else {
        &note.title
    }
}
