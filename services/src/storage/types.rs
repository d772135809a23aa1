//! Table storage types.

use std::path::PathBuf;

/// Error type for table storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read table from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse table from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize table: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write table to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
