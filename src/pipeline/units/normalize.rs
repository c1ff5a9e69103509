use std::sync::LazyLock;

use regex::Regex;

/// Soft hyphen and zero-width space / non-joiner / joiner.
static INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\u{00AD}\u{200B}\u{200C}\u{200D}]").expect("valid invisible regex"));

static TABS_AND_CR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\r]+").expect("valid tab regex"));

/// Two or more horizontal whitespace characters (newlines excluded).
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]{2,}").expect("valid space regex"));

/// A whole line that is a dash rule, a `Page N [of M]` footer, or a
/// `Confidential` stamp, together with its line break.
static BOILERPLATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^[^\S\n]*(?:-{2,}|page[^\S\n]+\d+(?:[^\S\n]+of[^\S\n]+\d+)?|confidential)[^\S\n]*(?:\n|$)",
    )
    .expect("valid boilerplate regex")
});

/// Strip extraction artifacts from segment text.
///
/// Line breaks survive so paragraphs can still be found; only horizontal
/// whitespace is collapsed. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let text = INVISIBLE.replace_all(text, "");
    let text = TABS_AND_CR.replace_all(&text, " ");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = BOILERPLATE_LINE.replace_all(&text, "");
    text.trim().to_string()
}
