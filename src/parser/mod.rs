//! Text-layer access and layout analysis.
//!
//! Raw spans come from a [`LayoutSource`]; [`collect_spans`] filters them
//! and [`cluster_lines`] groups them into visual lines.

mod backend;
mod lines;
mod options;
mod spans;

pub use backend::{decode_text_simple, BoundingBox, LayoutSource, LopdfSource, RawSpan};
pub use lines::{cluster_document, cluster_lines};
pub use options::{
    BucketAnchor, ClusterOptions, HeadingCriteria, JoinRule, HEADING_SIZE_COUNT,
    OUTLINE_MIN_CHAR_RUN, OUTLINE_Y_TOLERANCE, SECTION_Y_TOLERANCE,
};
pub use spans::{collect_document_spans, collect_spans, has_letter, page_plain_text};

use crate::model::Line;

/// Extract the lines of a whole document with the given clustering options.
pub fn extract_lines<S: LayoutSource + ?Sized>(source: &S, options: &ClusterOptions) -> Vec<Line> {
    let pages = collect_document_spans(source);
    let lines = cluster_document(pages, options);
    log::debug!(
        "Clustered {} lines from {} pages",
        lines.len(),
        source.page_count()
    );
    lines
}
