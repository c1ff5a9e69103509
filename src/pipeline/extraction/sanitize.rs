use std::sync::LazyLock;

use regex::Regex;

static TABS_AND_CR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\r]+").expect("valid tab regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid whitespace regex"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+").expect("valid sentence regex"));

/// Flatten recovered text into one sentence per line.
///
/// Tabs and carriage returns become spaces, whitespace runs collapse to a
/// single space, and a newline follows every `.`, `!` or `?` that is
/// followed by whitespace. Does not trim.
pub fn linearize_text(raw: &str) -> String {
    let text = TABS_AND_CR.replace_all(raw, " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    SENTENCE_END.replace_all(&text, "$1\n").into_owned()
}

/// Collapse every whitespace run (newlines included) into one space and trim.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
