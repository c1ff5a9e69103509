use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use regex::Regex;

use super::docx::OoxmlDocxConverter;
use super::fallback::{extract_printable_text, ByteFallbackExtractor};
use super::html::html_to_plain_text;
use super::pdf::PdfExtractTextLayer;
use super::spreadsheet::OoxmlSpreadsheetConverter;
use super::types::{DocxConverter, PdfTextExtractor, RawTextRecovery, SpreadsheetConverter};
use super::ParseError;
use crate::models::{SourceFormat, TextSegment};
use crate::pipeline_config::PipelineConfig;

static SHORTCUT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)URL=(.+)").expect("valid shortcut regex"));

/// Turns the bytes of one file into text segments.
///
/// Structured parsers are optional trait objects; a format whose parser is
/// absent, fails, panics or returns nothing goes to the byte-level fallback.
/// Never fails: the worst case is one segment of recovered printable text.
pub struct DocumentExtractor {
    pdf: Option<Box<dyn PdfTextExtractor + Send + Sync>>,
    docx: Option<Box<dyn DocxConverter + Send + Sync>>,
    spreadsheet: Option<Box<dyn SpreadsheetConverter + Send + Sync>>,
    fallback: Box<dyn RawTextRecovery + Send + Sync>,
}

impl DocumentExtractor {
    /// Extractor with no structured parsers; every binary format uses `fallback`.
    pub fn new(fallback: Box<dyn RawTextRecovery + Send + Sync>) -> Self {
        Self {
            pdf: None,
            docx: None,
            spreadsheet: None,
            fallback,
        }
    }

    pub fn with_pdf_extractor(mut self, pdf: Box<dyn PdfTextExtractor + Send + Sync>) -> Self {
        self.pdf = Some(pdf);
        self
    }

    pub fn with_docx_converter(mut self, docx: Box<dyn DocxConverter + Send + Sync>) -> Self {
        self.docx = Some(docx);
        self
    }

    pub fn with_spreadsheet_converter(
        mut self,
        spreadsheet: Box<dyn SpreadsheetConverter + Send + Sync>,
    ) -> Self {
        self.spreadsheet = Some(spreadsheet);
        self
    }

    /// Default parsers, honoring the per-format toggles.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut extractor = Self::new(Box::new(ByteFallbackExtractor));
        if config.structured_pdf {
            extractor = extractor.with_pdf_extractor(Box::new(PdfExtractTextLayer));
        }
        if config.structured_docx {
            extractor = extractor.with_docx_converter(Box::new(OoxmlDocxConverter));
        }
        if config.structured_spreadsheet {
            extractor = extractor.with_spreadsheet_converter(Box::new(OoxmlSpreadsheetConverter));
        }
        extractor
    }

    pub fn extract(&self, name: &str, bytes: &[u8], format: SourceFormat) -> Vec<TextSegment> {
        tracing::debug!(source = %name, format = format.as_str(), bytes = bytes.len(), "Extracting text");

        let structured = match format {
            SourceFormat::UrlShortcut => return vec![shortcut_segment(name, bytes)],
            SourceFormat::PlainText => {
                return vec![TextSegment::unpaged(String::from_utf8_lossy(bytes))]
            }
            // pdf-extract and the zip/XML readers can panic on malformed input.
            _ => panic::catch_unwind(AssertUnwindSafe(|| self.run_structured(bytes, format)))
                .unwrap_or_else(|payload| {
                    Some(Err(ParseError::Panicked(panic_message(&*payload))))
                }),
        };

        match structured {
            Some(Ok(segments)) if !segments.is_empty() => return segments,
            Some(Ok(_)) => {
                tracing::warn!(source = %name, format = format.as_str(), "Parser returned no content, using byte-level fallback");
            }
            Some(Err(e)) => {
                tracing::warn!(source = %name, format = format.as_str(), error = %e, "Parser failed, using byte-level fallback");
            }
            None => {
                tracing::debug!(source = %name, format = format.as_str(), "No structured parser, using byte-level fallback");
            }
        }

        let segments = self.fallback.recover(bytes, format);
        if segments.is_empty() {
            return vec![TextSegment::unpaged(extract_printable_text(bytes))];
        }
        segments
    }

    /// `None` when no structured parser is configured for `format`.
    fn run_structured(
        &self,
        bytes: &[u8],
        format: SourceFormat,
    ) -> Option<Result<Vec<TextSegment>, ParseError>> {
        match format {
            SourceFormat::Pdf => self.pdf.as_ref().map(|p| p.extract_pages(bytes)),
            SourceFormat::Docx => self.docx.as_ref().map(|d| docx_segments(&**d, bytes)),
            SourceFormat::Xlsx => self
                .spreadsheet
                .as_ref()
                .map(|s| sheet_segments(&**s, bytes)),
            SourceFormat::UrlShortcut | SourceFormat::PlainText => None,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Windows InternetShortcut: the `URL=` line, or the whole text.
fn shortcut_segment(name: &str, bytes: &[u8]) -> TextSegment {
    let text = String::from_utf8_lossy(bytes);
    let url = SHORTCUT_URL
        .captures(&text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| text.trim().to_string());
    TextSegment::unpaged(format!("# {name}\n\nSource URL: {url}"))
}

fn docx_segments(
    converter: &(dyn DocxConverter + Send + Sync),
    bytes: &[u8],
) -> Result<Vec<TextSegment>, ParseError> {
    let html = converter.convert_to_html(bytes)?;
    let text = html_to_plain_text(&html);
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![TextSegment::unpaged(text)])
}

fn sheet_segments(
    converter: &(dyn SpreadsheetConverter + Send + Sync),
    bytes: &[u8],
) -> Result<Vec<TextSegment>, ParseError> {
    let sheets = converter.convert_to_csv(bytes)?;
    Ok(sheets
        .into_iter()
        .map(|sheet| TextSegment::unpaged(format!("Sheet: {}\n\n{}", sheet.name, sheet.csv_text)))
        .collect())
}
