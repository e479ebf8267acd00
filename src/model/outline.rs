//! Outline types produced by heading-level inference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level inferred from relative font size rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Largest font size in the document
    H1,
    /// Second largest font size
    H2,
    /// Third largest font size
    H3,
}

impl HeadingLevel {
    /// Level for a 1-based size rank (1 = largest). Ranks past 3 are not headings.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A single heading in a document outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

/// Title and ordered headings of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,
    /// Headings in first-occurrence document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create an outline with a title and no headings.
    pub fn untitled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Headings at a given level.
    pub fn at_level(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(1), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_rank(3), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_rank(4), None);
        assert_eq!(HeadingLevel::from_rank(0), None);
    }

    #[test]
    fn test_level_serializes_as_name() {
        let entry = OutlineEntry {
            level: HeadingLevel::H2,
            text: "Background".to_string(),
            page: 3,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"Background","page":3}"#);
        assert_eq!(HeadingLevel::H2.to_string(), "H2");
    }

    #[test]
    fn test_outline_at_level() {
        let mut outline = DocumentOutline::untitled("Report");
        assert!(outline.is_empty());
        outline.outline.push(OutlineEntry {
            level: HeadingLevel::H1,
            text: "Intro".to_string(),
            page: 1,
        });
        outline.outline.push(OutlineEntry {
            level: HeadingLevel::H3,
            text: "Detail".to_string(),
            page: 2,
        });
        assert_eq!(outline.len(), 2);
        assert_eq!(outline.at_level(HeadingLevel::H3).count(), 1);
    }
}
