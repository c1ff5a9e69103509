use std::path::Path;

use crate::models::SourceFormat;

/// Pick the extraction route from the file extension.
///
/// Unknown or missing extensions are read as plain text.
pub fn detect_format(path: &Path) -> SourceFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => SourceFormat::Pdf,
        "docx" => SourceFormat::Docx,
        "xlsx" => SourceFormat::Xlsx,
        "url" => SourceFormat::UrlShortcut,
        _ => SourceFormat::PlainText,
    }
}

/// Files that the Additional Analysis counts as raw text without extraction.
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Sanitize a filename: strip path components, limit length
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect();

    if clean.is_empty() {
        "document".to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_to_formats() {
        assert_eq!(detect_format(Path::new("deck.pdf")), SourceFormat::Pdf);
        assert_eq!(detect_format(Path::new("Brief.DOCX")), SourceFormat::Docx);
        assert_eq!(detect_format(Path::new("pricing.xlsx")), SourceFormat::Xlsx);
        assert_eq!(detect_format(Path::new("link.url")), SourceFormat::UrlShortcut);
    }

    #[test]
    fn unknown_extensions_are_plain_text() {
        assert_eq!(detect_format(Path::new("notes.md")), SourceFormat::PlainText);
        assert_eq!(detect_format(Path::new("README")), SourceFormat::PlainText);
        assert_eq!(detect_format(Path::new("legacy.doc")), SourceFormat::PlainText);
    }

    #[test]
    fn csv_detection_ignores_case() {
        assert!(is_csv(Path::new("survey.CSV")));
        assert!(!is_csv(Path::new("survey.xlsx")));
    }

    #[test]
    fn sanitize_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("normal_file.pdf"), "normal_file.pdf");
        assert_eq!(sanitize_filename(""), "document");
        assert_eq!(sanitize_filename("file\0name.pdf"), "filename.pdf");
    }

    #[test]
    fn sanitize_preserves_normal_names() {
        assert_eq!(sanitize_filename("Nokia 5G brochure (1).pdf"), "Nokia 5G brochure (1).pdf");
    }
}
