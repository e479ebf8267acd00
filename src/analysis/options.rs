//! Options for persona-driven analysis runs.

use crate::parser::HeadingCriteria;
use crate::rank::{DEFAULT_TOP_SECTIONS, DEFAULT_TOP_SENTENCES};

/// Default size of the extraction worker pool.
pub const DEFAULT_WORKERS: usize = 4;

/// Options for an [`Analyzer`](super::Analyzer) run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Documents extracted concurrently
    pub workers: usize,

    /// Sections selected across all documents
    pub top_sections: usize,

    /// Sentences kept per selected section
    pub top_sentences: usize,

    /// Heading heuristics used during segmentation
    pub criteria: HeadingCriteria,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            top_sections: DEFAULT_TOP_SECTIONS,
            top_sentences: DEFAULT_TOP_SENTENCES,
            criteria: HeadingCriteria::default(),
        }
    }
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the number of selected sections.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Set the number of sentences kept per section.
    pub fn with_top_sentences(mut self, n: usize) -> Self {
        self.top_sentences = n;
        self
    }

    /// Replace the heading criteria.
    pub fn with_heading_criteria(mut self, criteria: HeadingCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}
