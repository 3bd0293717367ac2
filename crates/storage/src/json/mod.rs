use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use drill_core::model::ProgressState;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::repository::{ProgressRepository, Storage, StorageError};

mod mapping;

pub use mapping::ProgressRecord;

/// Progress stored as one pretty-printed JSON document.
///
/// Writes go to a temporary file in the same directory which is synced and
/// then renamed over the target, so a crash leaves either the previous or the
/// new document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ProgressRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<ProgressState>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let record: ProgressRecord = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display())))?;
        Ok(Some(record.into_state()))
    }

    fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        let record = ProgressRecord::from_state(state);
        let mut json = serde_json::to_vec_pretty(&record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        json.push(b'\n');

        let dir = self.directory();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = json.len(), "progress saved");
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file at `path`.
    ///
    /// The file is created on first save.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(JsonFileRepository::new(path));
        Self { progress }
    }
}
