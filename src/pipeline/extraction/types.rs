use serde::{Deserialize, Serialize};

use super::ParseError;
use crate::models::{SourceFormat, TextSegment};

/// One worksheet rendered as CSV text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCsv {
    pub name: String,
    pub csv_text: String,
}

/// PDF text-layer extraction (one segment per page, page numbers set).
pub trait PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<TextSegment>, ParseError>;
}

/// DOCX to HTML conversion.
pub trait DocxConverter {
    fn convert_to_html(&self, docx_bytes: &[u8]) -> Result<String, ParseError>;
}

/// Spreadsheet to per-sheet CSV conversion.
pub trait SpreadsheetConverter {
    fn convert_to_csv(&self, xlsx_bytes: &[u8]) -> Result<Vec<SheetCsv>, ParseError>;
}

/// Last-resort text recovery from raw bytes when no structured parser succeeds.
///
/// Infallible. An empty result leaves the caller to use the raw printable text.
pub trait RawTextRecovery {
    fn recover(&self, bytes: &[u8], format: SourceFormat) -> Vec<TextSegment>;
}
