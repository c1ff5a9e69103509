use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ooxml::{open_package, read_part};
use super::types::DocxConverter;
use super::ParseError;

const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX to HTML by walking the main document part.
///
/// Paragraphs become `<p>`, `HeadingN` styles become `<hN>` and numbered
/// paragraphs become `<li>`. Run formatting, tables-as-grid and images are
/// not carried over; only the reading order of text matters downstream.
pub struct OoxmlDocxConverter;

impl DocxConverter for OoxmlDocxConverter {
    fn convert_to_html(&self, docx_bytes: &[u8]) -> Result<String, ParseError> {
        let mut package = open_package(docx_bytes)?;
        let xml = read_part(&mut package, DOCUMENT_PART)?;
        document_xml_to_html(&xml)
    }
}

#[derive(Default)]
struct Paragraph {
    tag: String,
    text: String,
}

impl Paragraph {
    fn into_html(self) -> Option<String> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        let tag = if self.tag.is_empty() { "p" } else { &self.tag };
        Some(format!("<{tag}>{}</{tag}>", escape(text)))
    }
}

fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// `Heading2` / `heading 2` style ids map to `h2`.
fn heading_tag(style: &str) -> Option<String> {
    let lower = style.to_ascii_lowercase();
    let level = lower.strip_prefix("heading")?.trim();
    match level.parse::<u8>() {
        Ok(n @ 1..=6) => Some(format!("h{n}")),
        _ => None,
    }
}

fn apply_property(e: &BytesStart<'_>, paragraph: &mut Paragraph) {
    match e.local_name().as_ref() {
        b"pStyle" => {
            if let Some(tag) = attr_value(e, b"val").as_deref().and_then(heading_tag) {
                paragraph.tag = tag;
            }
        }
        b"numPr" if paragraph.tag.is_empty() => paragraph.tag = "li".into(),
        b"tab" | b"br" | b"cr" => paragraph.text.push(' '),
        _ => {}
    }
}

pub(crate) fn document_xml_to_html(xml: &str) -> Result<String, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut html = String::from("<html><body>");
    let mut paragraph: Option<Paragraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => paragraph = Some(Paragraph::default()),
                b"t" => in_text = true,
                _ => {
                    if let Some(p) = paragraph.as_mut() {
                        apply_property(&e, p);
                    }
                }
            },
            Event::Empty(e) => {
                if let Some(p) = paragraph.as_mut() {
                    apply_property(&e, p);
                }
            }
            Event::Text(t) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    p.text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(block) = paragraph.take().and_then(Paragraph::into_html) {
                        html.push_str(&block);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    html.push_str("</body></html>");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::super::html::html_to_plain_text;
    use super::super::ooxml::test_support::build_package;
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Offer</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">We cut costs </w:t></w:r><w:r><w:t>&amp; save time.</w:t></w:r></w:p>
    <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/></w:numPr></w:pPr><w:r><w:t>First</w:t><w:tab/><w:t>item</w:t></w:r></w:p>
    <w:p></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn paragraphs_headings_and_lists() {
        let html = document_xml_to_html(BODY).unwrap();
        assert_eq!(
            html,
            "<html><body><h1>Offer</h1><p>We cut costs &amp; save time.</p><li>First item</li></body></html>"
        );
    }

    #[test]
    fn converts_package_to_plain_text() {
        let bytes = build_package(&[("word/document.xml", BODY)]);
        let html = OoxmlDocxConverter.convert_to_html(&bytes).unwrap();
        assert_eq!(
            html_to_plain_text(&html),
            "Offer\nWe cut costs & save time.\nFirst item"
        );
    }

    #[test]
    fn package_without_document_part_fails() {
        let bytes = build_package(&[("word/styles.xml", "<w:styles/>")]);
        let err = OoxmlDocxConverter.convert_to_html(&bytes).unwrap_err();
        assert!(matches!(err, ParseError::MissingPart(_)));
    }

    #[test]
    fn heading_styles() {
        assert_eq!(heading_tag("Heading2").as_deref(), Some("h2"));
        assert_eq!(heading_tag("heading 3").as_deref(), Some("h3"));
        assert_eq!(heading_tag("Heading9"), None);
        assert_eq!(heading_tag("Title"), None);
    }
}
