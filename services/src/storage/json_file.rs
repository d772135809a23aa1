//! JSON file backed table storage.

use super::traits::TableStore;
use super::types::StoreError;
use checktable_model::Table;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Stores the table as one pretty-printed JSON document.
///
/// Every save rewrites the whole file. The new content is written to a
/// temporary file in the same directory and renamed over the old one, so a
/// concurrent reader sees either the previous or the next document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Arc<PathBuf>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }
}

impl TableStore for JsonFileStore {
    async fn load(&self) -> Result<Table, StoreError> {
        let content = tokio::fs::read_to_string(self.path.as_path())
            .await
            .map_err(|source| StoreError::read(self.path.as_path(), source))?;

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.to_path_buf(),
            source,
        })
    }

    async fn save(&self, table: &Table) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(table).map_err(StoreError::Serialize)?;
        let path = Arc::clone(&self.path);

        tokio::task::spawn_blocking(move || replace_file(&path, content.as_bytes()))
            .await
            .map_err(|e| StoreError::Unavailable(format!("write task failed: {e}")))?
    }
}

fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file =
        tempfile::NamedTempFile::new_in(dir).map_err(|source| StoreError::write(path, source))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|source| StoreError::write(path, source))?;
    file.persist(path)
        .map_err(|e| StoreError::write(path, e.error))?;

    Ok(())
}
