//! # pdfsense
//!
//! Structure recovery for PDF text layers.
//!
//! PDFs rarely tag their headings. This library infers structure from the
//! positions and font sizes of text spans and offers two pipelines on top:
//!
//! - **Outline extraction**: a title plus H1/H2/H3 headings with page
//!   numbers, one outline per document.
//! - **Persona-driven analysis**: given a reader persona and a task, the
//!   most relevant sections across a document set, each reduced to its
//!   most relevant sentences.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsense::{extract_outline, render, JsonFormat};
//!
//! fn main() -> pdfsense::Result<()> {
//!     let outline = extract_outline("report.pdf");
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Analysis
//!
//! Relevance is scored by an [`Embedder`]. With the `minilm` feature,
//! `MiniLmEmbedder` runs all-MiniLM-L6-v2 on candle; [`HashingEmbedder`]
//! is a model-free fallback that only measures shared vocabulary.
//!
//! ```no_run
//! use pdfsense::{AnalysisRequest, Analyzer, DirectoryStore, HashingEmbedder};
//!
//! let request = AnalysisRequest::from_dir("input")?;
//! let embedder = HashingEmbedder::new();
//! let report = Analyzer::new(&embedder).run(&request, &DirectoryStore::new("input"))?;
//! println!("{} sections", report.extracted_sections.len());
//! # Ok::<(), pdfsense::Error>(())
//! ```

pub mod analysis;
pub mod discover;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod rank;
pub mod render;
pub mod sections;

// Re-export commonly used types
pub use analysis::{
    AnalysisOptions, AnalysisRequest, Analyzer, DirectoryStore, DocumentStore, OutputAssembler,
    REQUEST_FILE_NAME,
};
pub use discover::{discover_pdfs, file_stem};
pub use error::{Error, Result};
pub use model::{
    AnalysisReport, DocumentOutline, DocumentSections, HeadingLevel, Line, OutlineEntry,
    RankedSection, RefinedExcerpt, Section, Span,
};
pub use outline::{HeadingSizes, OutlineBuilder};
pub use parser::{ClusterOptions, HeadingCriteria, LayoutSource, LopdfSource};
pub use rank::{cosine_similarity, Embedder, HashingEmbedder, Query};
#[cfg(feature = "minilm")]
pub use rank::MiniLmEmbedder;
pub use render::JsonFormat;
pub use sections::{HeadingNormalizer, SectionSegmenter};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// A document that cannot be opened yields an outline titled with the file
/// stem and no headings.
///
/// # Example
///
/// ```no_run
/// let outline = pdfsense::extract_outline("file01.pdf");
/// for entry in &outline.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> DocumentOutline {
    let path = path.as_ref();
    match try_extract_outline(path) {
        Ok(outline) => outline,
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            DocumentOutline::untitled(file_stem(path))
        }
    }
}

/// Extract the outline of a PDF file, failing if it cannot be opened.
pub fn try_extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let path = path.as_ref();
    let source = LopdfSource::load_file(path)?;
    Ok(extract_outline_from(&source, &file_stem(path)))
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8], fallback_title: &str) -> Result<DocumentOutline> {
    let source = LopdfSource::load_bytes(data)?;
    Ok(extract_outline_from(&source, fallback_title))
}

/// Extract the outline of any layout source.
pub fn extract_outline_from<S: LayoutSource + ?Sized>(
    source: &S,
    fallback_title: &str,
) -> DocumentOutline {
    OutlineBuilder::new().extract(source, fallback_title)
}

/// Extract candidate sections of a PDF file.
///
/// # Example
///
/// ```no_run
/// let sections = pdfsense::extract_sections("guide.pdf")?;
/// for s in &sections {
///     println!("{} (p. {})", s.title, s.page);
/// }
/// # Ok::<(), pdfsense::Error>(())
/// ```
pub fn extract_sections<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    let source = LopdfSource::load_file(path)?;
    Ok(SectionSegmenter::new().extract(&source))
}

/// Run a persona-driven analysis over an input directory.
///
/// Reads `challenge1b_input.json` from `input_dir` and resolves the
/// requested documents there.
pub fn analyze_dir<P: AsRef<Path>>(
    input_dir: P,
    embedder: &dyn Embedder,
    options: AnalysisOptions,
) -> Result<(AnalysisRequest, AnalysisReport)> {
    let input_dir = input_dir.as_ref();
    let request = AnalysisRequest::from_dir(input_dir)?;
    let store = DirectoryStore::new(input_dir);
    let report = Analyzer::new(embedder)
        .with_options(options)
        .run(&request, &store)?;
    Ok((request, report))
}

/// Builder for outline and section extraction with custom parameters.
///
/// # Example
///
/// ```no_run
/// use pdfsense::{HeadingCriteria, Pdfsense};
///
/// let sections = Pdfsense::new()
///     .with_outline_tolerance(2.5)
///     .with_heading_criteria(HeadingCriteria::new().with_section_limit(8))
///     .sections("guide.pdf")?;
/// # Ok::<(), pdfsense::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pdfsense {
    outline: OutlineBuilder,
    segmenter: SectionSegmenter,
}

impl Pdfsense {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line clustering tolerance of the outline pipeline.
    pub fn with_outline_tolerance(mut self, tolerance: f32) -> Self {
        let options = self.outline.cluster_options().with_y_tolerance(tolerance);
        self.outline = self.outline.with_cluster_options(options);
        self
    }

    /// Set the clustering options of the section pipeline.
    pub fn with_section_clustering(mut self, options: ClusterOptions) -> Self {
        self.segmenter = self.segmenter.with_cluster_options(options);
        self
    }

    /// Set the heading criteria of the section pipeline.
    pub fn with_heading_criteria(mut self, criteria: HeadingCriteria) -> Self {
        self.segmenter = self.segmenter.with_criteria(criteria);
        self
    }

    /// Extract an outline, falling back to the file stem on read errors.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> DocumentOutline {
        let path = path.as_ref();
        let stem = file_stem(path);
        match LopdfSource::load_file(path) {
            Ok(source) => self.outline.extract(&source, &stem),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                DocumentOutline::untitled(stem)
            }
        }
    }

    /// Extract candidate sections.
    pub fn sections<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Section>> {
        let source = LopdfSource::load_file(path)?;
        Ok(self.segmenter.extract(&source))
    }

    /// Outline builder in use.
    pub fn outline_builder(&self) -> &OutlineBuilder {
        &self.outline
    }

    /// Section segmenter in use.
    pub fn segmenter(&self) -> &SectionSegmenter {
        &self.segmenter
    }
}
