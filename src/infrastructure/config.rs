//! Configuration management

use crate::error::{BlocknotesError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".blocknotes";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database file name inside .blocknotes
    #[serde(default = "default_database")]
    pub database: String,
    /// Directory (relative to the notebook root) receiving recordings
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
    pub recorder: String,
    pub player: String,
    pub created: DateTime<Utc>,
}

fn default_database() -> String {
    "notes.db".to_string()
}

fn default_media_dir() -> String {
    "media".to_string()
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            database: default_database(),
            media_dir: default_media_dir(),
            recorder: Self::detect_default_recorder(),
            player: Self::detect_default_player(),
            created: Utc::now(),
        }
    }

    /// Load config from .blocknotes/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BlocknotesError::NotNotebookDirectory(path.to_path_buf())
            } else {
                BlocknotesError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .blocknotes/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_dir = path.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        if !config_dir.exists() {
            fs::create_dir(&config_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Database path for a notebook rooted at `root`
    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(&self.database)
    }

    /// Recordings directory for a notebook rooted at `root`
    pub fn media_path(&self, root: &Path) -> PathBuf {
        root.join(&self.media_dir)
    }

    /// Get the recorder command, checking the environment first
    pub fn get_recorder(&self) -> String {
        std::env::var("BLOCKNOTES_RECORDER").unwrap_or_else(|_| self.recorder.clone())
    }

    /// Get the player command, checking the environment first
    pub fn get_player(&self) -> String {
        std::env::var("BLOCKNOTES_PLAYER").unwrap_or_else(|_| self.player.clone())
    }

    fn detect_default_recorder() -> String {
        std::env::var("BLOCKNOTES_RECORDER").unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "rec -q".to_string()
            } else {
                "arecord -q -f cd".to_string()
            }
        })
    }

    fn detect_default_player() -> String {
        std::env::var("BLOCKNOTES_PLAYER").unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "afplay".to_string()
            } else {
                "mpv --really-quiet --no-video".to_string()
            }
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new();
        assert_eq!(config.database, "notes.db");
        assert_eq!(config.media_dir, "media");
        assert!(!config.recorder.is_empty());
        assert!(!config.player.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config::new();

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".blocknotes").exists());
        assert!(temp.path().join(".blocknotes/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();

        assert_eq!(loaded.database, config.database);
        assert_eq!(loaded.player, config.player);
        assert_eq!(loaded.recorder, config.recorder);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            BlocknotesError::NotNotebookDirectory(_) => {}
            other => panic!("Expected NotNotebookDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_fills_missing_optional_keys() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".blocknotes")).unwrap();
        fs::write(
            temp.path().join(".blocknotes/config.toml"),
            "recorder = \"rec\"\nplayer = \"play\"\ncreated = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.database, "notes.db");
        assert_eq!(loaded.media_dir, "media");
        assert_eq!(loaded.recorder, "rec");
    }

    #[test]
    fn test_load_malformed_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".blocknotes")).unwrap();
        fs::write(temp.path().join(".blocknotes/config.toml"), "player = [").unwrap();

        assert!(matches!(
            Config::load_from_dir(temp.path()),
            Err(BlocknotesError::TomlDeserialize(_))
        ));
    }

    #[test]
    fn test_paths_are_relative_to_root() {
        let config = Config::new();
        let root = Path::new("/srv/notebook");
        assert_eq!(
            config.database_path(root),
            PathBuf::from("/srv/notebook/.blocknotes/notes.db")
        );
        assert_eq!(config.media_path(root), PathBuf::from("/srv/notebook/media"));
    }
}
