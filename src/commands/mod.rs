//! Caller-facing operations.
//!
//! Each command takes plain inputs plus the pipeline configuration, drives a
//! `SectionSession`, and returns a serializable report. Errors are rendered
//! to strings at this boundary.

pub mod analyze;
pub mod classify;
pub mod extraction;

pub use analyze::{analyze_files, AnalysisReport};
pub use classify::{classify_text, ClassifyReport};
pub use extraction::{extract_section, ExtractReport, ExtractRequest};
