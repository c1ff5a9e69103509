use serde::Serialize;

/// A named, immutable set of lowercase phrases.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
}

impl Lexicon {
    /// Number of distinct phrases occurring in `lowered`.
    ///
    /// The caller lowercases once; phrases are matched as plain substrings,
    /// so `only` also hits inside `commonly`.
    pub fn count_hits(&self, lowered: &str) -> usize {
        self.phrases.iter().filter(|p| lowered.contains(**p)).count()
    }

    pub fn hits(&self, lowered: &str) -> bool {
        self.phrases.iter().any(|p| lowered.contains(*p))
    }

    /// Phrases that occur in `lowered`, in lexicon order.
    pub fn matches(&self, lowered: &str) -> Vec<&'static str> {
        self.phrases
            .iter()
            .copied()
            .filter(|p| lowered.contains(*p))
            .collect()
    }
}

/// Phrases one lexicon matched in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconMatch {
    pub lexicon: &'static str,
    pub phrases: Vec<&'static str>,
}

/// Every lexicon with at least one hit in `lowered`, in `lexicons` order.
pub fn matched_phrases(lowered: &str, lexicons: &[Lexicon]) -> Vec<LexiconMatch> {
    lexicons
        .iter()
        .filter_map(|lexicon| {
            let phrases = lexicon.matches(lowered);
            (!phrases.is_empty()).then_some(LexiconMatch {
                lexicon: lexicon.name,
                phrases,
            })
        })
        .collect()
}

/// Every lexicon, criteria first, then resource origin and posture.
pub const ALL_LEXICONS: [Lexicon; 14] = [
    BENEFITS_COSTS,
    COSTS_ONLY,
    DIFFERENTIATION,
    COMPETITORS,
    VALUE_FUNCTIONAL,
    VALUE_EXPERIENTIAL,
    LIFECYCLE,
    RESOURCE_SHARING,
    CONFIGURATION,
    DESIGN_SEGMENT,
    FIRM_RESOURCES,
    MARKET_RESOURCES,
    POINTS_OF_DIFFERENCE,
    POINTS_OF_PARITY,
];

// ═══════════════════════════════════════════════════════════
// CVP criteria
// ═══════════════════════════════════════════════════════════

pub const BENEFITS_COSTS: Lexicon = Lexicon {
    name: "benefits_costs",
    phrases: &[
        "benefit", "benefits", "value", "outcome", "outcomes", "improve", "enhance", "optimize",
        "save time", "save cost", "reduce cost", "lower cost", "cost savings", "efficiency",
        "effectiveness", "reliability", "trust", "security", "scalable", "performance",
        "usability", "experience", "roi", "return on investment", "total cost of ownership", "tco",
    ],
};

/// Unioned into the benefits/costs criterion.
pub const COSTS_ONLY: Lexicon = Lexicon {
    name: "costs_only",
    phrases: &[
        "price", "cost", "risk", "time-to-market", "maintenance", "operational cost", "capex",
        "opex",
    ],
};

pub const DIFFERENTIATION: Lexicon = Lexicon {
    name: "differentiation",
    phrases: &[
        "differentiate", "differentiated", "unique", "only", "unmatched", "best-in-class",
        "competitive advantage", "distinctive", "proprietary", "patented", "one-of-a-kind",
        "superior",
    ],
};

/// Comparison language, unioned into the differentiation criterion.
pub const COMPETITORS: Lexicon = Lexicon {
    name: "competitors",
    phrases: &[
        "vs competitor", "than competitors", "compared to", "benchmark", "market leader",
        "leaders", "alternative", "alternatives",
    ],
};

pub const VALUE_FUNCTIONAL: Lexicon = Lexicon {
    name: "value_functional",
    phrases: &[
        "functional", "performance", "availability", "reliability", "scalability", "latency",
        "throughput", "interoperability", "compliance", "security", "privacy",
    ],
};

pub const VALUE_EXPERIENTIAL: Lexicon = Lexicon {
    name: "value_experiential",
    phrases: &[
        "experiential", "experience", "ease of use", "usability", "design", "aesthetics", "brand",
        "support", "service", "customer success", "onboarding",
    ],
};

pub const LIFECYCLE: Lexicon = Lexicon {
    name: "lifecycle",
    phrases: &[
        "before use", "pre-sale", "onboarding", "during use", "in-use", "after use", "post-sale",
        "renewal", "adoption", "retention", "customer journey", "lifecycle", "co-create",
        "co-created", "co-creation",
    ],
};

pub const RESOURCE_SHARING: Lexicon = Lexicon {
    name: "resource_sharing",
    phrases: &[
        "partner", "partners", "alliance", "alliances", "ecosystem", "integration with", "joint",
        "co-innovate", "co-develop", "collaborat", "api", "platform partnership",
    ],
};

pub const CONFIGURATION: Lexicon = Lexicon {
    name: "configuration",
    phrases: &[
        "configure", "configured", "configuration", "orchestrate", "orchestration", "bundle",
        "bundled", "solutioning", "process", "processes", "operating model", "capability",
        "capabilities", "resource", "resources", "platform", "architecture", "framework",
    ],
};

pub const DESIGN_SEGMENT: Lexicon = Lexicon {
    name: "design_segment",
    phrases: &[
        "for enterprises", "for smb", "for consumers", "for operators", "for manufacturers",
        "segment", "vertical", "for banks", "for healthcare", "for government", "for telco",
        "for education", "for retail", "target customers", "customer segment", "persona",
    ],
};

// ═══════════════════════════════════════════════════════════
// Resource origin
// ═══════════════════════════════════════════════════════════

pub const FIRM_RESOURCES: Lexicon = Lexicon {
    name: "firm_resources",
    phrases: &[
        "leadership", "strategy", "strategic alignment", "internal", "capability", "capabilities",
        "process", "processes", "product knowledge", "technical expertise", "operations",
        "operational", "platform", "infrastructure", "scalable architecture",
    ],
};

pub const MARKET_RESOURCES: Lexicon = Lexicon {
    name: "market_resources",
    phrases: &[
        "customer", "client", "consumer", "market", "competitor", "brand", "branding",
        "relationship", "insight", "market insight", "innovation", "innovative", "culture",
        "co-create", "partnership", "ecosystem", "partner",
    ],
};

// ═══════════════════════════════════════════════════════════
// Differentiation posture
// ═══════════════════════════════════════════════════════════

pub const POINTS_OF_DIFFERENCE: Lexicon = Lexicon {
    name: "points_of_difference",
    phrases: &[
        "unique", "only", "first", "leading", "best-in-class", "differentiated", "proprietary",
        "patented", "exclusive", "distinctive", "unmatched", "state-of-the-art",
    ],
};

pub const POINTS_OF_PARITY: Lexicon = Lexicon {
    name: "points_of_parity",
    phrases: &[
        "standard", "compliant", "compliance", "baseline", "expected", "required",
        "industry standard", "best practice", "meets requirements", "mandatory",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_are_lowercase_and_trimmed() {
        for lexicon in ALL_LEXICONS {
            for phrase in lexicon.phrases {
                assert_eq!(*phrase, phrase.to_lowercase(), "{}: {phrase}", lexicon.name);
                assert_eq!(*phrase, phrase.trim(), "{}: {phrase}", lexicon.name);
            }
        }
    }

    #[test]
    fn counts_distinct_phrases_not_occurrences() {
        // "cost" and "price" hit; repeating "cost" does not add more.
        assert_eq!(COSTS_ONLY.count_hits("cost cost cost and price"), 2);
    }

    #[test]
    fn substring_matching_is_intentional() {
        assert!(DIFFERENTIATION.hits("commonly deployed"));
        assert_eq!(RESOURCE_SHARING.matches("we collaborate via open apis"), vec!["collaborat", "api"]);
    }

    #[test]
    fn matched_phrases_skips_lexicons_without_hits() {
        let matched = matched_phrases("a patented platform", &[COSTS_ONLY, DIFFERENTIATION, CONFIGURATION]);
        assert_eq!(
            matched,
            vec![
                LexiconMatch { lexicon: "differentiation", phrases: vec!["patented"] },
                LexiconMatch { lexicon: "configuration", phrases: vec!["platform"] },
            ]
        );
    }

    #[test]
    fn lexicon_names_are_unique() {
        let mut names: Vec<_> = ALL_LEXICONS.iter().map(|l| l.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_LEXICONS.len());
    }

    #[test]
    fn empty_lexicon_never_hits() {
        let empty = Lexicon { name: "empty", phrases: &[] };
        assert!(!empty.hits("anything"));
        assert_eq!(empty.count_hits("anything"), 0);
    }
}
