use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize_text;
use super::prefilter::passes_prefilter;
use crate::pipeline::extraction::collapse_whitespace;

/// Paragraphs longer than this many characters are split into sentences.
pub const SENTENCE_SPLIT_THRESHOLD: usize = 160;

/// A blank line, possibly holding stray horizontal whitespace.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").expect("valid paragraph regex"));

fn ends_sentence(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn starts_sentence(c: char) -> bool {
    c.is_ascii_uppercase() || c == '(' || c == '['
}

/// Split a paragraph after `.`, `!` or `?` followed by whitespace, but only
/// where the next character is an uppercase letter or an opening bracket.
///
/// Abbreviations followed by lowercase words and decimals such as `2.5`
/// stay intact. The whitespace at each break is dropped.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if ends_sentence(c) {
            let mut next = i + 1;
            while next < chars.len() && chars[next].1.is_whitespace() {
                next += 1;
            }
            if next > i + 1 && next < chars.len() && starts_sentence(chars[next].1) {
                spans.push(&paragraph[start..pos + c.len_utf8()]);
                start = chars[next].0;
                i = next;
                continue;
            }
        }
        i += 1;
    }

    spans.push(&paragraph[start..]);
    spans
}

/// Normalize segment text and cut it into units that pass the pre-filter.
///
/// Paragraphs come from blank lines; line breaks inside a paragraph are
/// folded into spaces. Returned units are trimmed.
pub fn split_into_units(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = normalize_text(text);
    let mut units = Vec::new();

    for raw_paragraph in PARAGRAPH_BREAK.split(&normalized) {
        let paragraph = collapse_whitespace(raw_paragraph);
        if paragraph.is_empty() {
            continue;
        }

        let spans = if paragraph.chars().count() > SENTENCE_SPLIT_THRESHOLD {
            split_sentences(&paragraph)
        } else {
            vec![paragraph.as_str()]
        };

        units.extend(
            spans
                .into_iter()
                .map(str::trim)
                .filter(|s| passes_prefilter(s))
                .map(str::to_string),
        );
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_before_capitalised_sentences() {
        let spans = split_sentences("We lead. Others follow! Why? (Because) [we] can.");
        assert_eq!(spans, vec!["We lead.", "Others follow!", "Why?", "(Because) [we] can."]);
    }

    #[test]
    fn keeps_abbreviations_and_decimals() {
        let text = "Latency drops to 2.5 ms, e.g. for edge sites. Throughput rises.";
        assert_eq!(
            split_sentences(text),
            vec!["Latency drops to 2.5 ms, e.g. for edge sites.", "Throughput rises."]
        );
    }

    #[test]
    fn punctuation_without_whitespace_is_not_a_break() {
        assert_eq!(split_sentences("Visit example.Com today"), vec!["Visit example.Com today"]);
    }

    #[test]
    fn trailing_punctuation_yields_single_span() {
        assert_eq!(split_sentences("Just one sentence. "), vec!["Just one sentence. "]);
    }

    #[test]
    fn empty_text_has_no_units() {
        assert!(split_into_units("").is_empty());
    }

    #[test]
    fn short_paragraphs_are_not_sentence_split() {
        // Under the threshold: the two sentences stay one unit.
        let text = "Our platform cuts energy use for operators. It also simplifies network upgrades.";
        assert!(text.chars().count() <= SENTENCE_SPLIT_THRESHOLD);
        assert_eq!(split_into_units(text), vec![text.to_string()]);
    }

    #[test]
    fn long_paragraphs_are_sentence_split() {
        let first = "Our cloud platform reduces total cost of ownership for enterprise operators worldwide.";
        let second = "Customers adopt it quickly because onboarding takes days rather than several months.";
        let paragraph = format!("{first} {second}");
        assert!(paragraph.chars().count() > SENTENCE_SPLIT_THRESHOLD);

        assert_eq!(split_into_units(&paragraph), vec![first.to_string(), second.to_string()]);
    }

    #[test]
    fn blank_lines_separate_paragraphs_and_lines_fold() {
        let text = "Our managed service keeps critical networks\nrunning for hospitals and banks.\n \nWe secure every device with proprietary zero trust controls built in.";
        assert_eq!(
            split_into_units(text),
            vec![
                "Our managed service keeps critical networks running for hospitals and banks.".to_string(),
                "We secure every device with proprietary zero trust controls built in.".to_string(),
            ]
        );
    }

    #[test]
    fn units_failing_prefilter_are_dropped() {
        let text = "Too short.\n\nTable 2 lists the supported platforms for every enterprise customer segment.";
        assert!(split_into_units(text).is_empty());
    }
}
