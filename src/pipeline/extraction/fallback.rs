//! Byte-level fallback extraction.
//!
//! Recovers visible text fragments from binary containers (uncompressed PDF
//! content streams, stray XML in OOXML archives) without a format parser.
//! Best effort only: page detection is a heuristic with no correctness
//! guarantee on arbitrary input. Each call re-scans the whole byte slice and
//! keeps no state between calls.

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::linearize_text;
use super::types::RawTextRecovery;
use crate::models::{SourceFormat, TextSegment};

/// Leading `Page N` / `Pg N` marker at the start of a line.
static PAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:page|pg)\s*([0-9]{1,4})\b").expect("valid page regex"));

/// Form feed or a line of five or more dashes.
static PSEUDO_PAGE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x0C|\n\s*-{5,}\s*\n").expect("valid page break regex"));

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("valid line regex"));

/// Printable ASCII, or any byte from the high range (possible UTF-8 content).
fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte) || byte >= 160
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn flush_run(run: &mut Vec<u8>, out: &mut String) {
    if run.is_empty() {
        return;
    }
    {
        let decoded = String::from_utf8_lossy(run);
        if decoded.chars().any(is_word_char) {
            out.push_str(&decoded);
            out.push(' ');
        }
    }
    run.clear();
}

/// Collect runs of printable bytes into text, one sentence per line.
pub fn extract_printable_text(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut run = Vec::new();

    for &byte in bytes {
        if is_printable(byte) {
            run.push(byte);
        } else {
            flush_run(&mut run, &mut out);
        }
    }
    flush_run(&mut run, &mut out);

    linearize_text(&out)
}

/// Recover text from raw bytes and split it into page segments.
pub fn extract_printable_text_with_pages(bytes: &[u8], format: SourceFormat) -> Vec<TextSegment> {
    let text = extract_printable_text(bytes);
    split_pages(&text, format)
}

/// Split recovered text into page segments.
///
/// Strategy 1: explicit `Page N` markers; each starts a new segment.
/// Strategy 2 (paged formats only, when no marker was found): form feeds
/// or dash rules as pseudo page breaks. Otherwise one unpaged segment.
pub fn split_pages(text: &str, format: SourceFormat) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut current_page: Option<u32> = None;
    let mut current_lines: Vec<&str> = Vec::new();

    for line in LINE_BREAKS.split(text).filter(|l| !l.is_empty()) {
        if let Some(caps) = PAGE_MARKER.captures(line) {
            if !current_lines.is_empty() {
                segments.push(TextSegment::new(current_lines.join("\n"), current_page));
                current_lines.clear();
            }
            current_page = caps[1].parse().ok();
            continue;
        }
        current_lines.push(line);
    }
    if !current_lines.is_empty() {
        segments.push(TextSegment::new(current_lines.join("\n"), current_page));
    }

    let no_markers = segments.iter().all(|s| s.page.is_none());
    if no_markers && format.is_paged() {
        let parts: Vec<&str> = PSEUDO_PAGE_BREAK.split(text).collect();
        if parts.len() > 1 {
            tracing::debug!(pages = parts.len(), "Fallback split on pseudo page breaks");
            segments = parts
                .into_iter()
                .enumerate()
                .map(|(i, part)| TextSegment::new(part, Some(i as u32 + 1)))
                .collect();
        }
    }

    if segments.is_empty() {
        return vec![TextSegment::unpaged(text)];
    }
    segments
}

/// The byte-level fallback behind the same seam as the structured parsers.
pub struct ByteFallbackExtractor;

impl RawTextRecovery for ByteFallbackExtractor {
    fn recover(&self, bytes: &[u8], format: SourceFormat) -> Vec<TextSegment> {
        let segments = extract_printable_text_with_pages(bytes, format);
        tracing::debug!(
            bytes = bytes.len(),
            format = format.as_str(),
            segments = segments.len(),
            "Byte-level fallback extraction"
        );
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_printable_runs_and_drops_binary() {
        let mut bytes = b"Hello world".to_vec();
        bytes.extend_from_slice(&[0x00, 0x01, 0x02]);
        bytes.extend_from_slice(b"second run");
        assert_eq!(extract_printable_text(&bytes), "Hello world second run ");
    }

    #[test]
    fn runs_without_word_characters_are_dropped() {
        let mut bytes = b"<<>> %%".to_vec();
        bytes.push(0x00);
        bytes.extend_from_slice(b"kept");
        assert_eq!(extract_printable_text(&bytes), "kept ");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        // 0xC3 alone is an incomplete sequence but still in the printable range.
        let bytes = [b'a', b'b', 0xC3, b'c', 0x00];
        let text = extract_printable_text(&bytes);
        assert!(text.starts_with("ab"));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.contains('c'));
    }

    #[test]
    fn high_range_utf8_survives() {
        let mut bytes = "caf\u{00E9} menu".as_bytes().to_vec();
        bytes.push(0x07);
        assert_eq!(extract_printable_text(&bytes), "caf\u{00E9} menu ");
    }

    #[test]
    fn sentence_boundaries_become_newlines() {
        let mut bytes = b"One sentence here. Another one follows! Done".to_vec();
        bytes.push(0x00);
        let text = extract_printable_text(&bytes);
        assert_eq!(text, "One sentence here.\nAnother one follows!\nDone ");
    }

    #[test]
    fn page_markers_start_segments() {
        let text = "Preamble line\nPage 1\nAlpha text\nMore alpha\nPg 2\nBeta text";
        let segments = split_pages(text, SourceFormat::Pdf);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], TextSegment::new("Preamble line", None));
        assert_eq!(segments[1], TextSegment::new("Alpha text\nMore alpha", Some(1)));
        assert_eq!(segments[2], TextSegment::new("Beta text", Some(2)));
    }

    #[test]
    fn page_markers_are_case_insensitive() {
        let segments = split_pages("PAGE 7\nbody", SourceFormat::Docx);
        assert_eq!(segments, vec![TextSegment::new("body", Some(7))]);
    }

    #[test]
    fn dash_rules_split_paged_formats() {
        let text = "First page body.\n------\nSecond page body.";
        let segments = split_pages(text, SourceFormat::Pdf);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].page, Some(1));
        assert_eq!(segments[0].text, "First page body.");
        assert_eq!(segments[1].page, Some(2));
        assert_eq!(segments[1].text, "Second page body.");
    }

    #[test]
    fn dash_rules_ignored_for_unpaged_formats() {
        let text = "First body.\n------\nSecond body.";
        let segments = split_pages(text, SourceFormat::Docx);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].page, None);
    }

    #[test]
    fn no_markers_yields_single_unpaged_segment() {
        let segments = split_pages("Just one line.\nAnd another.", SourceFormat::Pdf);
        assert_eq!(segments, vec![TextSegment::new("Just one line.\nAnd another.", None)]);
    }

    #[test]
    fn empty_input_yields_one_empty_segment() {
        let segments = ByteFallbackExtractor.recover(&[0x00, 0x01], SourceFormat::Pdf);
        assert_eq!(segments, vec![TextSegment::unpaged("")]);
    }

    #[test]
    fn recovers_text_from_uncompressed_pdf_stream() {
        let pdf = b"%PDF-1.4\n1 0 obj\n<< /Length 44 >>\nstream\nBT /F1 12 Tf (Page 1) Tj ET\nendstream\n\
                    2 0 obj\nstream\n(Our platform reduces cost.) Tj\nendstream\n%%EOF";
        let segments = ByteFallbackExtractor.recover(pdf, SourceFormat::Pdf);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert!(joined.contains("Our platform reduces cost."));
    }
}
