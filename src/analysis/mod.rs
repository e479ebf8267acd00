//! Persona-driven analysis of a document set.
//!
//! An [`Analyzer`] extracts candidate sections from every requested
//! document on a bounded worker pool, ranks them against the persona/task
//! query, refines the winners down to their most relevant sentences and
//! assembles an [`AnalysisReport`].

mod assemble;
mod options;
mod pool;
mod request;
mod store;

pub use assemble::{format_timestamp, OutputAssembler};
pub use options::{AnalysisOptions, DEFAULT_WORKERS};
pub use pool::ExtractionPool;
pub use request::{
    AnalysisRequest, ChallengeInfo, DocumentRef, JobToBeDone, Persona, REQUEST_FILE_NAME,
};
pub use store::{DirectoryStore, DocumentStore};

use crate::error::Result;
use crate::model::{AnalysisReport, DocumentSections, RankedSection, RefinedExcerpt};
use crate::parser::page_plain_text;
use crate::rank::{Embedder, Query, SectionRanker, SentenceRefiner};
use crate::sections::SectionSegmenter;

/// Runs the section ranking pipeline with one shared embedder.
pub struct Analyzer<'a> {
    embedder: &'a dyn Embedder,
    options: AnalysisOptions,
    assembler: OutputAssembler,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer with default options.
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self {
            embedder,
            options: AnalysisOptions::default(),
            assembler: OutputAssembler::new(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the report assembler.
    pub fn with_assembler(mut self, assembler: OutputAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Options in use.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze the requested documents.
    ///
    /// Fails with [`Error::NoHeadings`](crate::Error::NoHeadings) when no
    /// document yields a candidate section.
    pub fn run<S: DocumentStore + ?Sized>(
        &self,
        request: &AnalysisRequest,
        store: &S,
    ) -> Result<AnalysisReport> {
        self.run_with_progress(request, store, |_| {})
    }

    /// Analyze the requested documents, reporting each extracted document.
    pub fn run_with_progress<S, F>(
        &self,
        request: &AnalysisRequest,
        store: &S,
        on_document: F,
    ) -> Result<AnalysisReport>
    where
        S: DocumentStore + ?Sized,
        F: FnMut(&DocumentSections),
    {
        let filenames = request.filenames();
        log::info!(
            "Analyzing {} documents for '{}'",
            filenames.len(),
            request.role()
        );

        let segmenter = SectionSegmenter::new().with_criteria(self.options.criteria.clone());
        let pool = ExtractionPool::new(self.options.workers)?;
        let candidates = pool.extract(store, &segmenter, &filenames, on_document);

        let query = Query::new(request.role(), request.task(), self.embedder)?;
        let ranked = self.rank(&query, &candidates)?;
        let excerpts = self.refine(&query, &ranked, store)?;

        Ok(self.assembler.assemble(request, &ranked, excerpts))
    }

    /// Rank candidate sections against the query.
    pub fn rank(
        &self,
        query: &Query,
        candidates: &[DocumentSections],
    ) -> Result<Vec<RankedSection>> {
        SectionRanker::new(self.embedder)
            .with_top_sections(self.options.top_sections)
            .rank(query, candidates)
    }

    /// Refine each ranked section, reading page text from the store when a
    /// section body is empty.
    pub fn refine<S: DocumentStore + ?Sized>(
        &self,
        query: &Query,
        ranked: &[RankedSection],
        store: &S,
    ) -> Result<Vec<RefinedExcerpt>> {
        let refiner =
            SentenceRefiner::new(self.embedder).with_top_sentences(self.options.top_sentences);
        ranked
            .iter()
            .map(|r| {
                refiner.refine(query, r, || {
                    let source = store.open(&r.document)?;
                    page_plain_text(source.as_ref(), r.section.page)
                })
            })
            .collect()
    }
}
