//! Per-section working state.
//!
//! One `SectionSession` per section, owned by the caller and passed into
//! each operation. The pipeline itself keeps no state between calls.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::{CvpRecord, Section};
use crate::pipeline::classify;
use crate::pipeline::import::{is_csv, read_source_file, sanitize_filename, SourceEntry};
use crate::pipeline::processor::{run_extraction, ExtractionOutcome, ProcessingError, SourceAcquirer};

/// Result of the Additional Analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    /// Files that were read successfully.
    pub documents: usize,
    pub characters: usize,
}

#[derive(Debug, Clone)]
pub struct SectionSession {
    section: Section,
    sources: Vec<SourceEntry>,
    records: Vec<CvpRecord>,
    search_query: String,
    analysis_files: Vec<PathBuf>,
}

impl SectionSession {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            sources: Vec::new(),
            records: Vec::new(),
            search_query: String::new(),
            analysis_files: Vec::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn sources(&self) -> &[SourceEntry] {
        &self.sources
    }

    pub fn records(&self) -> &[CvpRecord] {
        &self.records
    }

    pub fn analysis_files(&self) -> &[PathBuf] {
        &self.analysis_files
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.sources.push(SourceEntry::file(path));
    }

    /// Blank input is ignored. Returns whether a source was added.
    pub fn add_url(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.sources.push(SourceEntry::url(url));
        true
    }

    /// Run extraction over every queued source and replace the records.
    ///
    /// On `EmptyBatch` nothing runs and existing records are kept.
    pub fn extract(&mut self, acquirer: &SourceAcquirer) -> Result<ExtractionOutcome, ProcessingError> {
        let outcome = run_extraction(&self.sources, acquirer)?;
        self.records = outcome.records.clone();
        self.search_query.clear();

        tracing::info!(
            section = self.section.as_str(),
            records = self.records.len(),
            "Section records replaced"
        );
        Ok(outcome)
    }

    pub fn classify_resources(&mut self) {
        classify::classify_resources(&mut self.records);
    }

    pub fn classify_posture(&mut self) {
        classify::classify_postures(&mut self.records);
    }

    /// Records whose text, source or page contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&CvpRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }

        self.records
            .iter()
            .filter(|r| {
                [r.text.as_str(), r.source.as_str(), r.page_label().as_str()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The current view: all records, narrowed by the active search.
    pub fn filtered(&self) -> Vec<&CvpRecord> {
        self.search(&self.search_query)
    }

    /// Drop sources, records, search and analysis files for this section.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.records.clear();
        self.search_query.clear();
        self.analysis_files.clear();
        tracing::debug!(section = self.section.as_str(), "Section cleared");
    }

    pub fn add_analysis_file(&mut self, path: impl Into<PathBuf>) {
        self.analysis_files.push(path.into());
    }

    /// Count readable analysis files and the characters extracted from them.
    ///
    /// CSV files count their raw text; everything else goes through file
    /// acquisition. Unreadable files are logged and left out.
    pub fn analyze(&self, acquirer: &SourceAcquirer) -> Result<AnalysisSummary, ProcessingError> {
        if self.analysis_files.is_empty() {
            return Err(ProcessingError::EmptyBatch);
        }

        let mut summary = AnalysisSummary {
            documents: 0,
            characters: 0,
        };

        for path in &self.analysis_files {
            match analysis_text(path, acquirer) {
                Ok(text) => {
                    summary.documents += 1;
                    summary.characters += text.chars().count();
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Analysis failed, skipping file");
                }
            }
        }

        tracing::info!(
            section = self.section.as_str(),
            documents = summary.documents,
            characters = summary.characters,
            "Analysis complete"
        );
        Ok(summary)
    }
}

fn analysis_text(path: &Path, acquirer: &SourceAcquirer) -> Result<String, crate::pipeline::import::ImportError> {
    if is_csv(path) {
        let bytes = read_source_file(path, acquirer.max_file_bytes())?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    let name = sanitize_filename(&path.to_string_lossy());
    let segments = acquirer.acquire_file(path, &name)?;
    Ok(segments
        .into_iter()
        .map(|s| s.text)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Posture, ResourceClass};
    use crate::pipeline::extraction::{ByteFallbackExtractor, DocumentExtractor};
    use crate::pipeline::import::url::MockFetcher;

    const PLATFORM_CVP: &str = "Our platform delivers unmatched reliability and scalability for enterprise operators, reducing total cost of ownership while differentiating us from market leaders.";

    fn acquirer() -> SourceAcquirer {
        SourceAcquirer::new(
            DocumentExtractor::new(Box::new(ByteFallbackExtractor)),
            Box::new(MockFetcher::new()),
            1024 * 1024,
        )
    }

    fn session_with_records() -> SectionSession {
        let mut session = SectionSession::new(Section::Nokia);
        session.records = vec![
            CvpRecord::new("Private wireless for ports", "ports.pdf", Some(7)),
            CvpRecord::new("Quantum-safe transport for banks", "https://vendor.test", None),
        ];
        session
    }

    #[test]
    fn blank_url_is_ignored() {
        let mut session = SectionSession::new(Section::Academic);
        assert!(!session.add_url("   "));
        assert!(session.add_url(" https://a.test "));
        assert_eq!(session.sources(), &[SourceEntry::url("https://a.test")]);
    }

    #[test]
    fn extract_replaces_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        std::fs::write(&path, PLATFORM_CVP).unwrap();

        let mut session = session_with_records();
        session.add_file(&path);
        session.extract(&acquirer()).unwrap();

        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].text, PLATFORM_CVP);
    }

    #[test]
    fn empty_batch_keeps_existing_records() {
        let mut session = session_with_records();
        let err = session.extract(&acquirer()).unwrap_err();
        assert!(matches!(err, ProcessingError::EmptyBatch));
        assert_eq!(session.records().len(), 2);
    }

    #[test]
    fn classifiers_overwrite_previous_labels() {
        let mut session = SectionSession::new(Section::Quantum);
        let mut record = CvpRecord::new("The only patented platform for operations teams", "a", None);
        record.resource_class = Some(ResourceClass::Market);
        record.pop = Some(Posture::Pop);
        session.records = vec![record];

        session.classify_resources();
        session.classify_posture();
        assert_eq!(session.records()[0].resource_class, Some(ResourceClass::Firm));
        assert_eq!(session.records()[0].pop, Some(Posture::Pod));
    }

    #[test]
    fn search_matches_text_source_and_page() {
        let session = session_with_records();
        assert_eq!(session.search("WIRELESS").len(), 1);
        assert_eq!(session.search("vendor.test").len(), 1);
        assert_eq!(session.search("7")[0].source, "ports.pdf");
        assert_eq!(session.search("").len(), 2);
        assert!(session.search("satellite").is_empty());
    }

    #[test]
    fn filtered_view_follows_active_search() {
        let mut session = session_with_records();
        assert_eq!(session.filtered().len(), 2);
        session.set_search("banks");
        assert_eq!(session.filtered().len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut session = session_with_records();
        session.add_url("https://a.test");
        session.add_analysis_file("/tmp/notes.csv");
        session.set_search("ports");

        session.clear();
        assert!(session.sources().is_empty());
        assert!(session.records().is_empty());
        assert!(session.analysis_files().is_empty());
        assert_eq!(session.search_query(), "");
        assert_eq!(session.section(), Section::Nokia);
    }

    #[test]
    fn analyze_counts_readable_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("survey.csv");
        std::fs::write(&csv, "a,b\n1,2\n").unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "hello").unwrap();

        let mut session = SectionSession::new(Section::Competitors);
        session.add_analysis_file(&csv);
        session.add_analysis_file(&txt);
        session.add_analysis_file(dir.path().join("missing.docx"));

        let summary = session.analyze(&acquirer()).unwrap();
        assert_eq!(summary, AnalysisSummary { documents: 2, characters: 8 + 5 });
    }

    #[test]
    fn analyze_without_files_is_empty_batch() {
        let session = SectionSession::new(Section::Academic);
        assert!(matches!(session.analyze(&acquirer()), Err(ProcessingError::EmptyBatch)));
    }
}
