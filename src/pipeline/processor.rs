//! Extraction run orchestrator.
//!
//! Single entry point that drives a batch of sources through the pipeline:
//! acquire → normalize/segment → pre-filter → decide → dedupe → classify.
//!
//! Sources are processed one after another. A source that cannot be read is
//! logged and reported, never fatal; the batch keeps whatever the other
//! sources produced. Deduplication runs once, after every source is done.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CvpRecord, TextSegment, UnitCandidate};
use crate::pipeline::classify::{classify_postures, classify_resources, is_cvp};
use crate::pipeline::duplicate::dedupe_by_text;
use crate::pipeline::extraction::DocumentExtractor;
use crate::pipeline::import::{
    acquire_url, detect_format, read_source_file, FetchError, HttpFetcher, ImportError,
    SourceEntry, UrlFetcher,
};
use crate::pipeline::units::split_into_units;
use crate::pipeline_config::PipelineConfig;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("No sources to extract from. Add at least one file or URL.")]
    EmptyBatch,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// What happened to one source during a run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub segments: usize,
    /// Units that survived segmentation and the pre-filter.
    pub units_examined: usize,
    /// Units accepted as CVPs, before batch-wide deduplication.
    pub accepted: usize,
    /// Set when the source could not be read at all.
    pub error: Option<String>,
}

impl SourceReport {
    fn failed(name: String, error: &ImportError) -> Self {
        Self {
            name,
            segments: 0,
            units_examined: 0,
            accepted: 0,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Deduplicated and classified on both axes.
    pub records: Vec<CvpRecord>,
    pub reports: Vec<SourceReport>,
}

// ---------------------------------------------------------------------------
// Acquisition
// ---------------------------------------------------------------------------

/// Turns a `SourceEntry` into text segments.
pub struct SourceAcquirer {
    extractor: DocumentExtractor,
    fetcher: Box<dyn UrlFetcher + Send + Sync>,
    max_file_bytes: u64,
}

impl SourceAcquirer {
    pub fn new(
        extractor: DocumentExtractor,
        fetcher: Box<dyn UrlFetcher + Send + Sync>,
        max_file_bytes: u64,
    ) -> Self {
        Self {
            extractor,
            fetcher,
            max_file_bytes,
        }
    }

    /// Production acquirer: configured parsers and a blocking HTTP fetcher.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, FetchError> {
        Ok(Self::new(
            DocumentExtractor::from_config(config),
            Box::new(HttpFetcher::from_config(config)?),
            config.max_file_bytes,
        ))
    }

    /// Fails only when a file cannot be read. URLs always yield a segment.
    pub fn acquire(&self, source: &SourceEntry) -> Result<Vec<TextSegment>, ImportError> {
        match source {
            SourceEntry::File { path } => self.acquire_file(path, &source.display_name()),
            SourceEntry::Url { url } => Ok(acquire_url(url, &*self.fetcher)),
        }
    }

    pub fn acquire_file(&self, path: &Path, name: &str) -> Result<Vec<TextSegment>, ImportError> {
        let bytes = read_source_file(path, self.max_file_bytes)?;
        Ok(self.extractor.extract(name, &bytes, detect_format(path)))
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Extract, dedupe and classify CVP records from a batch of sources.
pub fn run_extraction(
    sources: &[SourceEntry],
    acquirer: &SourceAcquirer,
) -> Result<ExtractionOutcome, ProcessingError> {
    if sources.is_empty() {
        return Err(ProcessingError::EmptyBatch);
    }

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    tracing::info!(run_id = %run_id, sources = sources.len(), "Extraction run started");

    let mut candidates = Vec::new();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        let name = source.display_name();
        match acquirer.acquire(source) {
            Ok(segments) => {
                let report = collect_candidates(&name, &segments, &mut candidates);
                tracing::info!(
                    source = %name,
                    segments = report.segments,
                    units = report.units_examined,
                    accepted = report.accepted,
                    "Source processed"
                );
                reports.push(report);
            }
            Err(e) => {
                tracing::warn!(source = %name, error = %e, "Source could not be read, skipping");
                reports.push(SourceReport::failed(name, &e));
            }
        }
    }

    let accepted = candidates.len();
    let mut records = dedupe_by_text(candidates);
    classify_resources(&mut records);
    classify_postures(&mut records);

    tracing::info!(
        run_id = %run_id,
        accepted,
        records = records.len(),
        "Extraction run complete"
    );

    Ok(ExtractionOutcome {
        run_id,
        started_at,
        records,
        reports,
    })
}

/// Push every accepted unit of one source onto `out`.
fn collect_candidates(name: &str, segments: &[TextSegment], out: &mut Vec<CvpRecord>) -> SourceReport {
    let mut report = SourceReport {
        name: name.to_string(),
        segments: segments.len(),
        units_examined: 0,
        accepted: 0,
        error: None,
    };

    for segment in segments {
        for unit in split_into_units(&segment.text) {
            report.units_examined += 1;
            if !is_cvp(&unit) {
                continue;
            }
            report.accepted += 1;
            out.push(CvpRecord::from(UnitCandidate {
                unit_text: unit,
                source_name: name.to_string(),
                page: segment.page,
            }));
        }
    }

    report
}
