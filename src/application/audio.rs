//! Record and play audio items use case

use crate::application::edit_note::NoteSession;
use crate::domain::{new_id, ItemContent};
use crate::error::{BlocknotesError, Result};
use crate::infrastructure::{AudioPlayer, AudioRecorder, MediaBackend, NoteStore};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Where a new recording goes: the file to write and the link to store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingTarget {
    pub path: PathBuf,
    pub link: String,
}

impl RecordingTarget {
    /// A fresh file under `media_dir`, linked relative to the notebook root
    pub fn new(media_path: &Path, media_dir: &str) -> Self {
        let file_name = format!("{}.wav", new_id());
        RecordingTarget {
            path: media_path.join(&file_name),
            link: format!("{}/{}", media_dir.trim_end_matches('/'), file_name),
        }
    }
}

/// Record into `target` until `wait_for_stop` returns, then append the
/// clip as an audio item and save the note. Returns the new item id.
///
/// The recorder is released on every path, including a failing wait. A
/// recorder that failed on its own abandons the recording.
pub fn record_audio<B, F>(
    session: &mut NoteSession<'_>,
    recorder: &mut AudioRecorder<B>,
    target: &RecordingTarget,
    wait_for_stop: F,
) -> Result<String>
where
    B: MediaBackend,
    F: FnOnce(&AudioRecorder<B>) -> Result<()>,
{
    recorder.start(&target.path)?;

    if let Err(e) = wait_for_stop(&*recorder) {
        warn!(error = %e, "recording abandoned");
        if let Err(stop_err) = recorder.stop() {
            warn!(error = %stop_err, "failed to release recorder");
        }
        return Err(e);
    }

    let clip = recorder.stop()?;
    let item_id = session.add_audio(target.link.clone(), clip.duration_secs);
    session.save()?;

    info!(item = %item_id, duration_secs = clip.duration_secs, "recorded audio");
    Ok(item_id)
}

/// Link and declared duration of a stored audio item
pub fn audio_item(store: &NoteStore, note_id: &str, item_id: &str) -> Result<(String, u32)> {
    let item = store
        .find_item(note_id, item_id)?
        .ok_or_else(|| BlocknotesError::ItemNotFound(item_id.to_string()))?;

    match &item.content {
        ItemContent::Audio {
            link,
            duration_secs,
        } => Ok((link.clone(), *duration_secs)),
        _ => Err(BlocknotesError::InvalidItemKind(format!(
            "item {} is {}, not audio",
            item_id,
            item.kind()
        ))),
    }
}

/// Play `path` and block until the declared duration elapses or the
/// backend stops by itself
pub fn play_audio<B: MediaBackend>(
    player: &mut AudioPlayer<B>,
    path: &Path,
    duration_secs: u32,
    tick: Duration,
) -> Result<()> {
    player.play(path, duration_secs)?;
    wait_for_playback(player, tick)
}

/// Poll the player every `tick` until it is finished, then release it
pub fn wait_for_playback<B: MediaBackend>(
    player: &mut AudioPlayer<B>,
    tick: Duration,
) -> Result<()> {
    while !player.is_finished() {
        thread::sleep(tick);
    }
    player.stop()
}
