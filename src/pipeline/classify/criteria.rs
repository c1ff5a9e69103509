use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::lexicon::{
    BENEFITS_COSTS, COMPETITORS, CONFIGURATION, COSTS_ONLY, DESIGN_SEGMENT, DIFFERENTIATION,
    LIFECYCLE, RESOURCE_SHARING, VALUE_EXPERIENTIAL, VALUE_FUNCTIONAL,
};

/// "CVP", "CVPs", "value proposition(s)" as whole words.
static VP_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:cvps?|value\s+propositions?)\b").expect("valid VP word regex")
});

/// Lexicon evidence for one unit. Computed fresh, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriteriaResult {
    pub benefits_costs: bool,
    pub differentiation: bool,
    /// Functional or experiential value language.
    pub value_elements: bool,
    pub lifecycle: bool,
    pub resource_sharing: bool,
    pub configuration: bool,
    pub design_segment: bool,
    /// How many of the seven criteria above hold.
    pub count: u8,
    pub has_vp_word: bool,
    /// Functional and experiential value language both present.
    pub value_both: bool,
}

impl CriteriaResult {
    /// Build from the seven criteria and the two auxiliary flags; `count`
    /// is derived.
    #[allow(clippy::too_many_arguments)]
    pub fn from_flags(
        benefits_costs: bool,
        differentiation: bool,
        value_elements: bool,
        lifecycle: bool,
        resource_sharing: bool,
        configuration: bool,
        design_segment: bool,
        has_vp_word: bool,
        value_both: bool,
    ) -> Self {
        let count = [
            benefits_costs,
            differentiation,
            value_elements,
            lifecycle,
            resource_sharing,
            configuration,
            design_segment,
        ]
        .into_iter()
        .filter(|c| *c)
        .count() as u8;

        Self {
            benefits_costs,
            differentiation,
            value_elements,
            lifecycle,
            resource_sharing,
            configuration,
            design_segment,
            count,
            has_vp_word,
            value_both,
        }
    }

    /// Names of the criteria that hold, in scoring order.
    pub fn satisfied(&self) -> Vec<&'static str> {
        [
            ("benefits_costs", self.benefits_costs),
            ("differentiation", self.differentiation),
            ("value_elements", self.value_elements),
            ("lifecycle", self.lifecycle),
            ("resource_sharing", self.resource_sharing),
            ("configuration", self.configuration),
            ("design_segment", self.design_segment),
        ]
        .into_iter()
        .filter_map(|(name, hit)| hit.then_some(name))
        .collect()
    }
}

/// Score a unit against every criterion lexicon.
pub fn score_criteria(unit: &str) -> CriteriaResult {
    let lowered = unit.to_lowercase();
    let t = lowered.as_str();

    let functional = VALUE_FUNCTIONAL.hits(t);
    let experiential = VALUE_EXPERIENTIAL.hits(t);

    CriteriaResult::from_flags(
        BENEFITS_COSTS.hits(t) || COSTS_ONLY.hits(t),
        DIFFERENTIATION.hits(t) || COMPETITORS.hits(t),
        functional || experiential,
        LIFECYCLE.hits(t),
        RESOURCE_SHARING.hits(t),
        CONFIGURATION.hits(t),
        DESIGN_SEGMENT.hits(t),
        VP_WORD.is_match(t),
        functional && experiential,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_only_counts_toward_benefits() {
        let c = score_criteria("Lower the price of every handset we ship");
        assert!(c.benefits_costs);
        assert_eq!(c.count, 1);
    }

    #[test]
    fn competitor_language_counts_toward_differentiation() {
        let c = score_criteria("Benchmarked against alternatives in the lab");
        assert!(c.differentiation);
        assert!(!c.benefits_costs);
    }

    #[test]
    fn value_both_needs_functional_and_experiential() {
        let functional_only = score_criteria("Low latency links");
        assert!(functional_only.value_elements);
        assert!(!functional_only.value_both);

        let both = score_criteria("Low latency links with easy onboarding");
        assert!(both.value_elements);
        assert!(both.value_both);
    }

    #[test]
    fn auxiliary_flags_do_not_count() {
        let c = score_criteria("Our value proposition");
        assert!(c.has_vp_word);
        // "value" is a benefits phrase, nothing else hits.
        assert_eq!(c.satisfied(), vec!["benefits_costs"]);
        assert_eq!(c.count, 1);
    }

    #[test]
    fn vp_word_respects_word_boundaries() {
        assert!(score_criteria("Three CVPs emerged").has_vp_word);
        assert!(score_criteria("Value  Propositions matter").has_vp_word);
        assert!(!score_criteria("cvpx tooling").has_vp_word);
        assert!(!score_criteria("value-propositional").has_vp_word);
    }

    #[test]
    fn unit_with_no_lexicon_language_scores_zero() {
        let c = score_criteria("The quick brown fox jumps over the lazy dog");
        assert_eq!(c.count, 0);
        assert!(c.satisfied().is_empty());
    }

    #[test]
    fn count_is_derived_from_flags() {
        let c = CriteriaResult::from_flags(true, true, false, false, true, false, false, true, true);
        assert_eq!(c.count, 3);
    }
}
