//! Application layer - Use cases and orchestration

pub mod audio;
pub mod clear_notes;
pub mod edit_note;
pub mod init;
pub mod list_notes;
pub mod manage_config;

pub use audio::{audio_item, play_audio, record_audio, RecordingTarget};
pub use clear_notes::clear_notes;
pub use edit_note::NoteSession;
pub use list_notes::{list_notes, remove_note};
pub use manage_config::ConfigService;
