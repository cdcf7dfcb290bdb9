//! Error types for blocknotes

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blocknotes
#[derive(Debug, Error)]
pub enum BlocknotesError {
    #[error("Not a blocknotes directory: {0}")]
    NotNotebookDirectory(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid item kind: {0}")]
    InvalidItemKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BlocknotesError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BlocknotesError::NotNotebookDirectory(_) => 2,
            BlocknotesError::NoteNotFound(_) | BlocknotesError::ItemNotFound(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BlocknotesError::NotNotebookDirectory(path) => {
                format!(
                    "Not a blocknotes directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'blocknotes init' in this directory to create a notebook\n\
                    • Navigate to an existing notebook directory\n\
                    • Set BLOCKNOTES_ROOT environment variable to your notebook path",
                    path.display()
                )
            }
            BlocknotesError::NoteNotFound(id) => {
                format!(
                    "Note not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'blocknotes list' to see note ids\n\
                    • Note ids are the full identifiers printed by 'blocknotes new'",
                    id
                )
            }
            BlocknotesError::ItemNotFound(id) => {
                format!(
                    "Item not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'blocknotes show <NOTE_ID>' to see item ids",
                    id
                )
            }
            BlocknotesError::Media(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that the recorder/player command is installed and in PATH\n\
                    • Set BLOCKNOTES_RECORDER or BLOCKNOTES_PLAYER\n\
                    • Configure it: blocknotes config player 'mpv --no-video'",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BlocknotesError
pub type Result<T> = std::result::Result<T, BlocknotesError>;
