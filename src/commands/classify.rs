//! Explain how a single piece of text is scored and classified.

use serde::Serialize;

use crate::models::{Posture, ResourceClass};
use crate::pipeline::classify::{
    classify_posture, classify_resource, decide, matched_phrases, score_criteria, CriteriaResult,
    LexiconMatch, Verdict, ALL_LEXICONS,
};
use crate::pipeline::units::{normalize_text, prefilter_rejection};

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub text: String,
    /// Shape check that rejected the text, if any.
    pub prefilter_rejection: Option<&'static str>,
    pub criteria: CriteriaResult,
    pub satisfied: Vec<&'static str>,
    /// Phrases behind the criteria and both classifiers, per lexicon.
    pub matched: Vec<LexiconMatch>,
    /// Lexicon verdict, independent of the pre-filter.
    pub verdict: Verdict,
    /// Pre-filter and verdict together.
    pub is_cvp: bool,
    pub resource_class: Option<ResourceClass>,
    pub posture: Option<Posture>,
}

pub fn classify_text(raw: &str) -> ClassifyReport {
    let text = normalize_text(raw);
    let rejection = prefilter_rejection(&text);
    let criteria = score_criteria(&text);
    let verdict = decide(&criteria);

    ClassifyReport {
        prefilter_rejection: rejection.map(|r| r.as_str()),
        satisfied: criteria.satisfied(),
        matched: matched_phrases(&text.to_lowercase(), &ALL_LEXICONS),
        is_cvp: rejection.is_none() && verdict.accepted,
        resource_class: classify_resource(&text),
        posture: classify_posture(&text),
        criteria,
        verdict,
        text,
    }
}
