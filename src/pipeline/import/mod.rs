pub mod format;
pub mod source;
pub mod url;

pub use format::*;
pub use source::*;
pub use url::*;

use thiserror::Error;

/// A source that could not be read at all (SourceReadFailure).
///
/// The extraction run logs it, records it on the source report and moves on.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("File too large: {size_mb:.1}MB exceeds {max_mb}MB limit")]
    FileTooLarge { size_mb: f64, max_mb: u64 },
}

/// A URL fetch that did not produce a usable response.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Could not connect to {0}")]
    Connection(String),

    #[error("Server returned status {status}")]
    Status { status: u16 },

    #[error("Could not read response body: {0}")]
    Body(String),
}
