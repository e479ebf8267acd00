//! Data model for outline extraction and section analysis.
//!
//! Spans and lines carry positional text between the parser and the
//! structure stages; outlines, sections and reports are the results.
//! Every value is transient and owned by a single run.

mod layout;
mod outline;
mod report;
mod section;

pub use layout::{round_tenth, size_key, Line, Span};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use report::{AnalysisReport, ExtractedSection, ReportMetadata, SubsectionAnalysis};
pub use section::{DocumentSections, RankedSection, RefinedExcerpt, Section};
