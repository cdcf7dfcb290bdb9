//! Infrastructure layer - Storage, configuration and media I/O

pub mod config;
pub mod database;
pub mod media;
pub mod note_store;
pub mod repository;
pub mod tables;

pub use config::Config;
pub use database::Database;
pub use media::{AudioPlayer, AudioRecorder, CommandBackend, MediaBackend, MediaHandle, RecordedClip};
pub use note_store::NoteStore;
pub use repository::{FileSystemRepository, NotebookRepository};
