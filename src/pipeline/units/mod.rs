//! Text to candidate units: normalization, paragraph/sentence splitting and
//! the shape pre-filter. Everything here is a pure function of its input.

pub mod normalize;
pub mod prefilter;
pub mod segment;

pub use normalize::normalize_text;
pub use prefilter::{passes_prefilter, prefilter_rejection, PrefilterRejection};
pub use segment::{split_into_units, split_sentences};
