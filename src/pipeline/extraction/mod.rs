pub mod types;
pub mod sanitize;
pub mod fallback;
pub mod html;
pub mod pdf;
mod ooxml;
pub mod docx;
pub mod spreadsheet;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use fallback::*;
pub use html::html_to_plain_text;
pub use orchestrator::*;

use thiserror::Error;

/// Failure of a structured document parser.
///
/// Never surfaced to callers of the pipeline: the orchestrator logs it and
/// switches the source to the byte-level fallback.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("Parser panicked: {0}")]
    Panicked(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing document part: {0}")]
    MissingPart(String),

    #[error("Cell reference out of range: {0}")]
    CellReference(String),
}
