//! Report assembly.

use chrono::{DateTime, Utc};

use super::request::AnalysisRequest;
use crate::model::{
    AnalysisReport, ExtractedSection, RankedSection, RefinedExcerpt, ReportMetadata,
    SubsectionAnalysis,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Merges ranked sections, excerpts and run metadata into a report.
#[derive(Debug, Clone, Default)]
pub struct OutputAssembler {
    fixed_time: Option<DateTime<Utc>>,
}

impl OutputAssembler {
    /// Create an assembler stamping reports with the current UTC time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp reports with a fixed time instead of the clock.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.fixed_time = Some(at);
        self
    }

    /// Build the report.
    pub fn assemble(
        &self,
        request: &AnalysisRequest,
        ranked: &[RankedSection],
        excerpts: Vec<RefinedExcerpt>,
    ) -> AnalysisReport {
        let at = self.fixed_time.unwrap_or_else(Utc::now);

        let metadata = ReportMetadata {
            input_documents: request.filenames(),
            persona: request.role().to_string(),
            job_to_be_done: request.task().to_string(),
            processing_timestamp: format_timestamp(&at),
        };

        let extracted_sections = ranked
            .iter()
            .map(|r| ExtractedSection {
                document: r.document.clone(),
                section_title: r.section.title.clone(),
                importance_rank: r.importance_rank,
                page_number: r.section.page,
            })
            .collect();

        let subsection_analysis = excerpts
            .into_iter()
            .map(|e| SubsectionAnalysis {
                document: e.document,
                refined_text: e.text,
                page_number: e.page,
            })
            .collect();

        AnalysisReport {
            metadata,
            extracted_sections,
            subsection_analysis,
        }
    }
}

/// ISO-8601 UTC timestamp without offset, microsecond precision.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.naive_utc().format(TIMESTAMP_FORMAT).to_string()
}
