//! Audio recording and playback handles
//!
//! A recorder or player owns at most one active backend handle. Starting a
//! new one releases the previous handle first, and dropping the owner
//! releases whatever is still active.

use crate::error::{BlocknotesError, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A running recording or playback
pub trait MediaHandle {
    /// Stop the handle. Fails when the backend had already ended with an
    /// error of its own.
    fn stop(&mut self) -> Result<()>;

    /// False once the underlying process or device finished on its own
    fn is_running(&mut self) -> bool;
}

/// Something that can start recording to, or playing from, a path
pub trait MediaBackend {
    type Handle: MediaHandle;

    fn start(&self, path: &Path) -> Result<Self::Handle>;
}

struct Active<H> {
    handle: H,
    path: PathBuf,
    started: Instant,
}

impl<H: MediaHandle> Active<H> {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stop the handle, logging instead of failing
    fn release(mut self, what: &str) {
        if let Err(e) = self.handle.stop() {
            warn!(path = %self.path.display(), error = %e, "failed to release {}", what);
        }
    }
}

fn start_active<B: MediaBackend>(backend: &B, path: &Path, what: &str) -> Result<Active<B::Handle>> {
    let handle = backend.start(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to start {}", what);
        e
    })?;
    debug!(path = %path.display(), "started {}", what);

    Ok(Active {
        handle,
        path: path.to_path_buf(),
        started: Instant::now(),
    })
}

/// A finished recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedClip {
    pub path: PathBuf,
    pub duration_secs: u32,
}

/// Exclusive owner of the active recording
pub struct AudioRecorder<B: MediaBackend> {
    backend: B,
    active: Option<Active<B::Handle>>,
}

impl<B: MediaBackend> AudioRecorder<B> {
    pub fn new(backend: B) -> Self {
        AudioRecorder {
            backend,
            active: None,
        }
    }

    /// Start recording to `path`, discarding any recording in progress
    pub fn start(&mut self, path: &Path) -> Result<()> {
        if let Some(previous) = self.active.take() {
            previous.release("recorder");
        }
        self.active = Some(start_active(&self.backend, path, "recorder")?);
        Ok(())
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Stop recording and report the clip; at least one second long
    pub fn stop(&mut self) -> Result<RecordedClip> {
        let mut active = self
            .active
            .take()
            .ok_or_else(|| BlocknotesError::Media("No recording in progress".to_string()))?;

        let duration_secs = whole_secs(active.elapsed()).max(1);
        active.handle.stop()?;
        debug!(path = %active.path.display(), duration_secs, "stopped recorder");

        Ok(RecordedClip {
            path: active.path,
            duration_secs,
        })
    }
}

impl<B: MediaBackend> Drop for AudioRecorder<B> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.release("recorder");
        }
    }
}

/// Exclusive owner of the active playback
pub struct AudioPlayer<B: MediaBackend> {
    backend: B,
    active: Option<(Active<B::Handle>, Duration)>,
}

impl<B: MediaBackend> AudioPlayer<B> {
    pub fn new(backend: B) -> Self {
        AudioPlayer {
            backend,
            active: None,
        }
    }

    /// Play `path`, which is declared to last `duration_secs`
    pub fn play(&mut self, path: &Path, duration_secs: u32) -> Result<()> {
        if let Some((previous, _)) = self.active.take() {
            previous.release("player");
        }
        let active = start_active(&self.backend, path, "player")?;
        self.active = Some((active, Duration::from_secs(u64::from(duration_secs))));
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// True when nothing plays, the declared duration has elapsed, or the
    /// backend stopped by itself
    pub fn is_finished(&mut self) -> bool {
        match self.active.as_mut() {
            None => true,
            Some((active, duration)) => {
                active.elapsed() >= *duration || !active.handle.is_running()
            }
        }
    }

    pub fn stop(&mut self) -> Result<()> {
        match self.active.take() {
            Some((mut active, _)) => {
                active.handle.stop()?;
                debug!(path = %active.path.display(), "stopped player");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<B: MediaBackend> Drop for AudioPlayer<B> {
    fn drop(&mut self) {
        if let Some((active, _)) = self.active.take() {
            active.release("player");
        }
    }
}

fn whole_secs(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX)
}

/// Backend that launches an external command with the media path as its
/// final argument
#[derive(Debug, Clone)]
pub struct CommandBackend {
    command: String,
}

impl CommandBackend {
    pub fn new(command: String) -> Self {
        CommandBackend { command }
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> Result<(String, Vec<String>)> {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        let (program, args) = parts
            .split_first()
            .ok_or_else(|| BlocknotesError::Media("No media command configured".to_string()))?;

        Ok((
            program.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        ))
    }
}

impl MediaBackend for CommandBackend {
    type Handle = ChildHandle;

    fn start(&self, path: &Path) -> Result<ChildHandle> {
        let (program, args) = self.parse_command()?;

        // On Windows, use cmd /c so .bat and .cmd wrappers are found
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&program);
            cmd
        };

        #[cfg(not(windows))]
        let mut cmd = Command::new(&program);

        let child = cmd
            .args(&args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BlocknotesError::Media(format!("Failed to launch '{}': {}", program, e)))?;

        Ok(ChildHandle { program, child })
    }
}

/// A spawned media process
#[derive(Debug)]
pub struct ChildHandle {
    program: String,
    child: Child,
}

impl MediaHandle for ChildHandle {
    fn stop(&mut self) -> Result<()> {
        match self.child.try_wait()? {
            // Exited on its own: its status decides
            Some(status) if !status.success() => Err(BlocknotesError::Media(format!(
                "'{}' exited with {}",
                self.program, status
            ))),
            Some(_) => Ok(()),
            None => {
                self.child.kill()?;
                self.child.wait()?;
                Ok(())
            }
        }
    }

    fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}
