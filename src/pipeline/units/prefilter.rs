use std::sync::LazyLock;

use regex::Regex;

pub const MIN_UNIT_CHARS: usize = 50;
pub const MAX_UNIT_CHARS: usize = 500;
pub const MIN_UNIT_WORDS: usize = 8;
/// Combined `;` and `,` count at which a unit reads as a list or table row.
pub const MAX_SEPARATORS: usize = 4;

static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:figure|table|appendix|references)\b").expect("valid section label regex")
});

static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)copyright|cookie|privacy|terms|subscribe|login|table of contents")
        .expect("valid boilerplate regex")
});

/// Why a candidate unit was rejected by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefilterRejection {
    Empty,
    TooShort,
    TooLong,
    TooFewWords,
    ListLike,
    SectionLabel,
    Boilerplate,
    MostlyNumeric,
}

impl PrefilterRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::TooFewWords => "too_few_words",
            Self::ListLike => "list_like",
            Self::SectionLabel => "section_label",
            Self::Boilerplate => "boilerplate",
            Self::MostlyNumeric => "mostly_numeric",
        }
    }
}

impl std::fmt::Display for PrefilterRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_numeric_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit() || c == '%' || c == '$')
}

/// First shape check the (trimmed) candidate fails, if any.
pub fn prefilter_rejection(candidate: &str) -> Option<PrefilterRejection> {
    let text = candidate.trim();
    if text.is_empty() {
        return Some(PrefilterRejection::Empty);
    }

    let len = text.chars().count();
    if len < MIN_UNIT_CHARS {
        return Some(PrefilterRejection::TooShort);
    }
    if len > MAX_UNIT_CHARS {
        return Some(PrefilterRejection::TooLong);
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < MIN_UNIT_WORDS {
        return Some(PrefilterRejection::TooFewWords);
    }
    if text.matches([';', ',']).count() >= MAX_SEPARATORS {
        return Some(PrefilterRejection::ListLike);
    }
    if SECTION_LABEL.is_match(text) {
        return Some(PrefilterRejection::SectionLabel);
    }
    if BOILERPLATE.is_match(text) {
        return Some(PrefilterRejection::Boilerplate);
    }

    let numeric = tokens.iter().filter(|t| is_numeric_token(t)).count();
    if numeric * 2 > tokens.len() {
        return Some(PrefilterRejection::MostlyNumeric);
    }

    None
}

/// Whether a candidate could plausibly be a prose CVP statement.
pub fn passes_prefilter(candidate: &str) -> bool {
    prefilter_rejection(candidate).is_none()
}
