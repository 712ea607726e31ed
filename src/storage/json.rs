//! One-file-per-document storage backend.

use crate::storage::{validate_name, Document, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each document as `<dir>/<name>.json`.
///
/// Writes go through a temporary file and rename so an interrupted write
/// never leaves a half-written snapshot behind.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens the storage directory, creating it if necessary.
    pub fn new(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl Storage for JsonFileStorage {
    fn save_or_create(&mut self, name: &str, data: &Document) -> StorageResult<()> {
        validate_name(name)?;

        let body = serde_json::to_vec_pretty(data)?;
        let path = self.document_path(name);
        let tmp = self.dir.join(format!("{}.json.tmp", name));

        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn get(&self, name: &str) -> StorageResult<Document> {
        validate_name(name)?;

        let path = self.document_path(name);
        if !path.exists() {
            return Err(StorageError::DocumentNotFound(name.to_string()));
        }

        let body = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn has(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.document_path(name).exists()
    }
}
