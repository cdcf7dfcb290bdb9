//! Notebook discovery and on-disk layout

use crate::error::{BlocknotesError, Result};
use crate::infrastructure::config::CONFIG_DIR;
use crate::infrastructure::{Config, NoteStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Abstract notebook operations
pub trait NotebookRepository {
    /// Get the root directory of this notebook
    fn root(&self) -> &Path;

    /// Load configuration from .blocknotes/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .blocknotes/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .blocknotes directory exists
    fn is_initialized(&self) -> bool;

    /// Create .blocknotes directory structure
    fn initialize(&self) -> Result<()>;

    /// Open the note database named by the config
    fn open_store(&self) -> Result<NoteStore>;
}

/// File system implementation of NotebookRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the notebook root.
    /// First checks BLOCKNOTES_ROOT, then walks up from the current directory
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("BLOCKNOTES_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_config_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(BlocknotesError::Config(format!(
                    "BLOCKNOTES_ROOT is set to '{}' but no .blocknotes directory found. \
                    Run 'blocknotes init' in that directory or unset BLOCKNOTES_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the notebook root by walking up from a specific directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_config_dir(&current) {
                debug!(root = %current.display(), "found notebook");
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(BlocknotesError::NotNotebookDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_config_dir(path: &Path) -> bool {
        path.join(CONFIG_DIR).is_dir()
    }

    /// Recordings directory, created on demand
    pub fn media_dir(&self, config: &Config) -> Result<PathBuf> {
        let dir = config.media_path(&self.root);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// Resolve a stored media link: relative links are relative to the root
    pub fn resolve_link(&self, link: &str) -> PathBuf {
        let path = Path::new(link);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl NotebookRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let config_dir = self.root.join(CONFIG_DIR);

        if config_dir.exists() {
            return Err(BlocknotesError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&config_dir)?;
        Ok(())
    }

    fn open_store(&self) -> Result<NoteStore> {
        let config = self.load_config()?;
        NoteStore::open(&config.database_path(&self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Note;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    fn initialized(temp: &TempDir) -> FileSystemRepository {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new()).unwrap();
        repo
    }

    #[test]
    fn test_is_initialized() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        assert!(!repo.is_initialized());
        repo.initialize().unwrap();
        assert!(repo.is_initialized());
        assert!(temp.path().join(".blocknotes").is_dir());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        repo.initialize().unwrap();
        assert!(repo.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".blocknotes")).unwrap();

        let subdir = temp.path().join("sub").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        let repo = FileSystemRepository::discover_from(&subdir).unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_fails_when_not_a_notebook() {
        let temp = TempDir::new().unwrap();

        match FileSystemRepository::discover_from(temp.path()).unwrap_err() {
            BlocknotesError::NotNotebookDirectory(_) => {}
            other => panic!("Expected NotNotebookDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_store_uses_configured_database() {
        let temp = TempDir::new().unwrap();
        let repo = initialized(&temp);

        let mut store = repo.open_store().unwrap();
        store.save_note(&mut Note::new("persisted")).unwrap();
        drop(store);

        assert!(temp.path().join(".blocknotes/notes.db").exists());
        let store = repo.open_store().unwrap();
        assert_eq!(store.count_notes().unwrap(), 1);
    }

    #[test]
    fn test_open_store_without_config_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        assert!(matches!(
            repo.open_store(),
            Err(BlocknotesError::NotNotebookDirectory(_))
        ));
    }

    #[test]
    fn test_media_dir_is_created() {
        let temp = TempDir::new().unwrap();
        let repo = initialized(&temp);
        let config = repo.load_config().unwrap();

        let dir = repo.media_dir(&config).unwrap();
        assert_eq!(dir, temp.path().join("media"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_resolve_link() {
        let repo = FileSystemRepository::new(PathBuf::from("/notebook"));
        assert_eq!(
            repo.resolve_link("media/a.wav"),
            PathBuf::from("/notebook/media/a.wav")
        );
        assert_eq!(repo.resolve_link("/abs/a.wav"), PathBuf::from("/abs/a.wav"));
    }

    #[test]
    fn test_discover_with_root_env() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("BLOCKNOTES_ROOT");

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".blocknotes")).unwrap();

        std::env::set_var("BLOCKNOTES_ROOT", temp.path());

        let repo = FileSystemRepository::discover().unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_root_env_not_initialized() {
        let _env_lock = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("BLOCKNOTES_ROOT");

        let temp = TempDir::new().unwrap();
        std::env::set_var("BLOCKNOTES_ROOT", temp.path());

        match FileSystemRepository::discover().unwrap_err() {
            BlocknotesError::Config(msg) => {
                assert!(msg.contains("no .blocknotes directory"));
            }
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
