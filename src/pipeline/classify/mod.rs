//! Lexicon scoring, the CVP verdict, and the two secondary classifiers.
//!
//! All lexicons are lowercase phrases matched as substrings of the
//! lowercased unit text. Nothing here allocates state between calls.

pub mod criteria;
pub mod decision;
pub mod lexicon;
pub mod posture;
pub mod resource;

pub use criteria::{score_criteria, CriteriaResult};
pub use decision::{decide, is_cvp, DecisionRule, Verdict};
pub use lexicon::{matched_phrases, Lexicon, LexiconMatch, ALL_LEXICONS};
pub use posture::{classify_posture, classify_postures};
pub use resource::{classify_resource, classify_resources};
