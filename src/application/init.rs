//! Initialize notebook use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, NotebookRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new notebook at the specified path.
pub fn init(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new();
    repo.save_config(&config)?;

    // Opening the store creates the schema
    let store = repo.open_store()?;
    info!(
        root = %path.display(),
        schema_version = store.database().schema_version()?,
        "initialized notebook"
    );

    println!("Initialized blocknotes notebook at {}", path.display());

    Ok(())
}
