//! File-backed key-value store.
//!
//! Each key is persisted as its own file under a base directory, so a
//! corrupt value can never take neighboring keys down with it. The default
//! location is a "Roses and Thorns" folder in the user's Documents
//! directory.

use anyhow::Result;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::storage::traits::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_directory: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a store in the default data directory,
    /// `<Documents>/Roses and Thorns`
    pub fn new_default() -> Result<Self> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine documents directory"))?;

        let data_dir = documents_dir.join("Roses and Thorns");
        info!("Using data directory: {}", data_dir.display());

        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Map a key to its backing file. Keys are restricted to a safe file-name
    /// alphabet; anything else is replaced so a key can never escape the base
    /// directory.
    fn file_path(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_directory.join(sanitized)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.file_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.file_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.file_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
