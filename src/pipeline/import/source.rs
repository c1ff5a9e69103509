use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::format::sanitize_filename;
use super::ImportError;

/// One input to an extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceEntry {
    File { path: PathBuf },
    Url { url: String },
}

impl SourceEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Name recorded as the `source` of every record from this entry.
    pub fn display_name(&self) -> String {
        match self {
            Self::File { path } => sanitize_filename(&path.to_string_lossy()),
            Self::Url { url } => url.clone(),
        }
    }
}

/// Read a whole source file, refusing anything over `max_bytes`.
pub fn read_source_file(path: &Path, max_bytes: u64) -> Result<Vec<u8>, ImportError> {
    let read_err = |source: std::io::Error| ImportError::Read {
        path: path.display().to_string(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(read_err)?;
    if !metadata.is_file() {
        return Err(ImportError::NotAFile(path.display().to_string()));
    }
    if metadata.len() > max_bytes {
        return Err(ImportError::FileTooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
            max_mb: max_bytes / (1024 * 1024),
        });
    }

    std::fs::read(path).map_err(read_err)
}
