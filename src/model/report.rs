//! Result object of a persona-driven analysis run.

use serde::{Deserialize, Serialize};

/// Run metadata echoed into the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Filenames of all requested documents, in request order
    pub input_documents: Vec<String>,
    /// Persona role
    pub persona: String,
    /// Task description
    pub job_to_be_done: String,
    /// UTC time the report was assembled (ISO-8601)
    pub processing_timestamp: String,
}

/// One ranked section in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document filename
    pub document: String,
    /// Normalized section title
    pub section_title: String,
    /// 1-based importance rank
    pub importance_rank: usize,
    /// Page of the section heading
    pub page_number: u32,
}

/// Refined text for one ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document filename
    pub document: String,
    /// Most relevant sentences in reading order
    pub refined_text: String,
    /// Page of the section heading
    pub page_number: u32,
}

/// Final structured result of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Run metadata
    pub metadata: ReportMetadata,
    /// Ranked sections
    pub extracted_sections: Vec<ExtractedSection>,
    /// Refined excerpts, one per ranked section
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
