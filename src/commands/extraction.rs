//! Extract CVP records for one section and optionally export them.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{CvpRecord, Section};
use crate::pipeline::export::export_csv;
use crate::pipeline::processor::{SourceAcquirer, SourceReport};
use crate::pipeline_config::PipelineConfig;
use crate::session::SectionSession;

#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub section: Section,
    pub files: Vec<PathBuf>,
    pub urls: Vec<String>,
    /// Narrows the returned and exported records.
    pub search: Option<String>,
    /// `Some(None)` exports under the section's default file name.
    pub csv: Option<Option<PathBuf>>,
}

impl ExtractRequest {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            files: Vec::new(),
            urls: Vec::new(),
            search: None,
            csv: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub section: Section,
    pub title: String,
    pub run_id: Uuid,
    pub sources: Vec<SourceReport>,
    /// Records after deduplication, before any search filter.
    pub total_records: usize,
    /// The current view: filtered by `search` when one was given.
    pub records: Vec<CvpRecord>,
    pub csv_path: Option<PathBuf>,
}

/// Run one extraction over the request's files and URLs.
pub fn extract_section(request: ExtractRequest, config: &PipelineConfig) -> Result<ExtractReport, String> {
    let acquirer = SourceAcquirer::from_config(config).map_err(|e| e.to_string())?;
    extract_with(request, &acquirer)
}

fn extract_with(request: ExtractRequest, acquirer: &SourceAcquirer) -> Result<ExtractReport, String> {
    let mut session = SectionSession::new(request.section);
    for file in request.files {
        session.add_file(file);
    }
    for url in &request.urls {
        session.add_url(url);
    }

    let outcome = session.extract(acquirer).map_err(|e| e.to_string())?;
    if let Some(query) = &request.search {
        session.set_search(query);
    }

    let view: Vec<CvpRecord> = session.filtered().into_iter().cloned().collect();

    let csv_path = request
        .csv
        .map(|path| path.unwrap_or_else(|| PathBuf::from(request.section.export_file_name())));
    if let Some(path) = &csv_path {
        export_csv(&view, path).map_err(|e| format!("Export to {} failed: {e}", path.display()))?;
    }

    Ok(ExtractReport {
        section: request.section,
        title: request.section.title().to_string(),
        run_id: outcome.run_id,
        sources: outcome.reports,
        total_records: session.records().len(),
        records: view,
        csv_path,
    })
}
