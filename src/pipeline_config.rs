//! Pipeline configuration.
//!
//! Controls the I/O side of the pipeline: fetch timeout, user agent, file
//! size ceiling, and which structured parsers are enabled. The heuristics
//! (unit limits, lexicons, decision rules) are fixed and not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Default maximum source file size: 100 MiB.
const DEFAULT_MAX_FILE_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Timeout for a single URL fetch.
    pub fetch_timeout_secs: u64,
    /// User agent sent with URL fetches.
    pub user_agent: String,
    /// Files above this size are skipped as unreadable.
    pub max_file_bytes: u64,
    /// Use the PDF text-layer parser before the byte-level fallback.
    pub structured_pdf: bool,
    /// Use the DOCX converter before the byte-level fallback.
    pub structured_docx: bool,
    /// Use the spreadsheet converter before the byte-level fallback.
    pub structured_spreadsheet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
            user_agent: format!("{}/{}", config::APP_NAME, config::APP_VERSION),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            structured_pdf: true,
            structured_docx: true,
            structured_spreadsheet: true,
        }
    }
}

impl PipelineConfig {
    /// Load configuration.
    ///
    /// Order: explicit path, then `CVP_EXTRACTOR_CONFIG`, then defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(config::CONFIG_PATH_ENV).ok();
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| from_env.map(Into::into));

        let mut cfg = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Ok(raw) = std::env::var(config::FETCH_TIMEOUT_ENV) {
            cfg.fetch_timeout_secs = parse_timeout(&raw)?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidEnv {
            name: config::FETCH_TIMEOUT_ENV.into(),
            value: raw.into(),
        })
}
