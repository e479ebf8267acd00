//! Section types for persona-driven analysis.

use serde::{Deserialize, Serialize};

/// A run of body text anchored by a detected heading line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text as it appeared in the document
    pub title: String,
    /// Page of the heading line (1-indexed)
    pub page: u32,
    /// Body text following the heading, one trailing space per line
    pub content: String,
}

impl Section {
    /// Open a new section at a heading line.
    pub fn new(title: impl Into<String>, page: u32) -> Self {
        Self {
            title: title.into(),
            page,
            content: String::new(),
        }
    }

    /// Append a body line.
    pub fn push_line(&mut self, text: &str) {
        self.content.push_str(text);
        self.content.push(' ');
    }
}

/// Sections extracted from one source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSections {
    /// Source document filename
    pub document: String,
    /// Candidate sections in document order
    pub sections: Vec<Section>,
}

impl DocumentSections {
    /// Create an empty result for a document.
    pub fn empty(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            sections: Vec::new(),
        }
    }
}

/// A section selected by relevance to the persona/task query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document filename
    pub document: String,
    /// The section, with its title normalized
    pub section: Section,
    /// Cosine similarity of the raw title to the query
    pub score: f32,
    /// 1-based rank among the final selection
    pub importance_rank: usize,
}

/// The most query-relevant sentences of a section, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedExcerpt {
    /// Source document filename
    pub document: String,
    /// Page of the section heading
    pub page: u32,
    /// Selected sentences joined with spaces
    pub text: String,
}
