use super::sanitize::linearize_text;
use super::types::PdfTextExtractor;
use super::ParseError;
use crate::models::TextSegment;

/// PDF text-layer extraction using the pdf-extract crate.
///
/// Pages are numbered from 1 in document order. Pages with no text after
/// cleanup are dropped, so page numbers may have gaps.
pub struct PdfExtractTextLayer;

impl PdfTextExtractor for PdfExtractTextLayer {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<TextSegment>, ParseError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ParseError::Pdf(e.to_string()))?;

        let pages = page_texts
            .into_iter()
            .enumerate()
            .filter_map(|(i, text)| {
                let cleaned = linearize_text(&text).trim().to_string();
                (!cleaned.is_empty()).then(|| TextSegment::new(cleaned, Some(i as u32 + 1)))
            })
            .collect();

        Ok(pages)
    }
}
