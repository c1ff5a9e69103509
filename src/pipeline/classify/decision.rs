//! The CVP accept/reject verdict.
//!
//! Rules are applied in a fixed order over one intermediate boolean:
//!
//! 1. threshold: accept when at least [`ACCEPT_THRESHOLD`] criteria hold;
//! 2. force-accept: any strong combination turns a reject into an accept;
//! 3. VP-word suppression: a unit that names "value proposition" or "CVP"
//!    but is otherwise weak is turned back into a reject.
//!
//! Suppression runs last so it sees the outcome of every accept path.

use serde::Serialize;

use super::criteria::{score_criteria, CriteriaResult};
use crate::pipeline::units::passes_prefilter;

pub const ACCEPT_THRESHOLD: u8 = 3;

/// Which rule settled the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    BelowThreshold,
    Threshold,
    /// Resource sharing together with configuration.
    SharedResourceConfiguration,
    /// Differentiation together with value language.
    DifferentiatedValue,
    /// Segment targeting plus differentiation, configuration or resource sharing.
    TargetedStrong,
    /// Functional and experiential value language together.
    ValueBoth,
    VpWordSuppressed,
}

impl DecisionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowThreshold => "below_threshold",
            Self::Threshold => "threshold",
            Self::SharedResourceConfiguration => "shared_resource_configuration",
            Self::DifferentiatedValue => "differentiated_value",
            Self::TargetedStrong => "targeted_strong",
            Self::ValueBoth => "value_both",
            Self::VpWordSuppressed => "vp_word_suppressed",
        }
    }
}

impl std::fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accepted: bool,
    pub rule: DecisionRule,
}

fn shared_resource_configuration(c: &CriteriaResult) -> bool {
    c.resource_sharing && c.configuration
}

fn differentiated_value(c: &CriteriaResult) -> bool {
    c.differentiation && c.value_elements
}

fn targeted_strong(c: &CriteriaResult) -> bool {
    c.design_segment && (c.differentiation || c.configuration || c.resource_sharing)
}

/// First force-accept combination that holds, in rule order.
fn force_accept(c: &CriteriaResult) -> Option<DecisionRule> {
    if shared_resource_configuration(c) {
        Some(DecisionRule::SharedResourceConfiguration)
    } else if differentiated_value(c) {
        Some(DecisionRule::DifferentiatedValue)
    } else if targeted_strong(c) {
        Some(DecisionRule::TargetedStrong)
    } else if c.value_both {
        Some(DecisionRule::ValueBoth)
    } else {
        None
    }
}

/// Segment targeting alone does not shield a unit from suppression.
fn suppressed_by_vp_word(c: &CriteriaResult) -> bool {
    c.has_vp_word
        && c.count < ACCEPT_THRESHOLD
        && !shared_resource_configuration(c)
        && !differentiated_value(c)
        && !c.value_both
}

pub fn decide(c: &CriteriaResult) -> Verdict {
    // 1. threshold
    let mut verdict = if c.count >= ACCEPT_THRESHOLD {
        Verdict { accepted: true, rule: DecisionRule::Threshold }
    } else {
        Verdict { accepted: false, rule: DecisionRule::BelowThreshold }
    };

    // 2. force-accept
    if !verdict.accepted {
        if let Some(rule) = force_accept(c) {
            verdict = Verdict { accepted: true, rule };
        }
    }

    // 3. VP-word suppression
    if verdict.accepted && suppressed_by_vp_word(c) {
        verdict = Verdict { accepted: false, rule: DecisionRule::VpWordSuppressed };
    }

    verdict
}

/// Full check for one unit: shape pre-filter, then the lexicon verdict.
pub fn is_cvp(unit: &str) -> bool {
    passes_prefilter(unit) && decide(&score_criteria(unit)).accepted
}
