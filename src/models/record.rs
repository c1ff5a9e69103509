use serde::{Deserialize, Serialize};

use super::enums::{Posture, ResourceClass};

/// A run of text recovered from one source, optionally tied to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub page: Option<u32>,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }

    /// Segment for sources with no page concept.
    pub fn unpaged(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}

/// A candidate unit together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitCandidate {
    pub unit_text: String,
    pub source_name: String,
    pub page: Option<u32>,
}

/// An accepted customer value proposition statement.
///
/// `text` is always the trimmed unit. The two classification fields are
/// filled in by the secondary classifiers and may stay unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvpRecord {
    pub text: String,
    pub source: String,
    pub page: Option<u32>,
    pub resource_class: Option<ResourceClass>,
    pub pop: Option<Posture>,
}

impl CvpRecord {
    pub fn new(text: &str, source: &str, page: Option<u32>) -> Self {
        Self {
            text: text.trim().to_string(),
            source: source.to_string(),
            page,
            resource_class: None,
            pop: None,
        }
    }

    /// Key under which records are considered duplicates.
    pub fn dedup_key(&self) -> String {
        self.text.to_lowercase()
    }

    /// Page rendered for display and export (empty when unknown).
    pub fn page_label(&self) -> String {
        self.page.map(|p| p.to_string()).unwrap_or_default()
    }
}

impl From<UnitCandidate> for CvpRecord {
    fn from(candidate: UnitCandidate) -> Self {
        CvpRecord::new(&candidate.unit_text, &candidate.source_name, candidate.page)
    }
}
