//! Config management use case

use crate::error::{BlocknotesError, Result};
use crate::infrastructure::{Config, FileSystemRepository, NotebookRepository};

const KEYS: &str = "database, media_dir, recorder, player, created";

/// Service for managing notebook configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "database" => Ok(config.database),
            "media_dir" => Ok(config.media_dir),
            "recorder" => Ok(config.recorder),
            "player" => Ok(config.player),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(BlocknotesError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "database" => {
                if value.trim().is_empty() || value.contains(['/', '\\']) {
                    return Err(BlocknotesError::Config(format!(
                        "Invalid database file name: '{}'",
                        value
                    )));
                }
                config.database = value.to_string();
            }
            "media_dir" => {
                config.media_dir = value.to_string();
            }
            "recorder" => {
                config.recorder = value.to_string();
            }
            "player" => {
                config.player = value.to_string();
            }
            "created" => {
                return Err(BlocknotesError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(BlocknotesError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: database, media_dir, recorder, player",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new()).unwrap();
        ConfigService::new(repo)
    }

    #[test]
    fn test_get_defaults() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert_eq!(service.get("database").unwrap(), "notes.db");
        assert_eq!(service.get("media_dir").unwrap(), "media");
    }

    #[test]
    fn test_set_player() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("player", "ffplay -nodisp -autoexit").unwrap();
        assert_eq!(service.get("player").unwrap(), "ffplay -nodisp -autoexit");
    }

    #[test]
    fn test_created_is_read_only() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.get("created").is_ok());
        assert!(service.set("created", "2025-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(matches!(
            service.get("mode"),
            Err(BlocknotesError::Config(_))
        ));
        assert!(service.set("mode", "x").is_err());
    }

    #[test]
    fn test_database_name_must_be_a_file_name() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("database", "../escape.db").is_err());
        assert!(service.set("database", " ").is_err());
        service.set("database", "other.db").unwrap();
        assert_eq!(service.list().unwrap().database, "other.db");
    }
}
