//! Additional Analysis: size up a set of files without extracting CVPs.

use std::path::PathBuf;

use serde::Serialize;

use crate::models::Section;
use crate::pipeline::processor::SourceAcquirer;
use crate::pipeline_config::PipelineConfig;
use crate::session::{AnalysisSummary, SectionSession};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub section: Section,
    pub files: usize,
    #[serde(flatten)]
    pub summary: AnalysisSummary,
}

impl AnalysisReport {
    pub fn message(&self) -> String {
        format!(
            "Analyzed {} file(s). Extracted ~{} characters.",
            self.summary.documents, self.summary.characters
        )
    }
}

pub fn analyze_files(section: Section, files: Vec<PathBuf>, config: &PipelineConfig) -> Result<AnalysisReport, String> {
    let acquirer = SourceAcquirer::from_config(config).map_err(|e| e.to_string())?;
    analyze_with(section, files, &acquirer)
}

fn analyze_with(section: Section, files: Vec<PathBuf>, acquirer: &SourceAcquirer) -> Result<AnalysisReport, String> {
    let mut session = SectionSession::new(section);
    let count = files.len();
    for file in files {
        session.add_analysis_file(file);
    }

    let summary = session
        .analyze(acquirer)
        .map_err(|_| "No files selected.".to_string())?;

    Ok(AnalysisReport {
        section,
        files: count,
        summary,
    })
}
