//! Font-size ranking for heading-level inference.

use std::collections::BTreeSet;

use crate::model::{size_key, HeadingLevel, Line};
use crate::parser::HEADING_SIZE_COUNT;

/// The largest distinct font sizes of a document, descending.
///
/// Rank 1 maps to H1, rank 2 to H2, rank 3 to H3. Sizes are compared by
/// their one-decimal rounding, so lines with the same rounded size always
/// receive the same level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingSizes {
    /// Size keys (tenths of a point), largest first
    ranked: Vec<i32>,
}

impl HeadingSizes {
    /// Rank the sizes of the given lines, keeping the top three.
    pub fn from_lines(lines: &[Line]) -> Self {
        Self::with_limit(lines, HEADING_SIZE_COUNT)
    }

    /// Rank the sizes of the given lines, keeping the top `limit`.
    pub fn with_limit(lines: &[Line], limit: usize) -> Self {
        let distinct: BTreeSet<i32> = lines.iter().map(Line::size_key).collect();
        let ranked = distinct.into_iter().rev().take(limit).collect();
        Self { ranked }
    }

    /// Heading level of a font size, `None` if it is not a heading size.
    pub fn level(&self, font_size: f32) -> Option<HeadingLevel> {
        let key = size_key(font_size);
        self.ranked
            .iter()
            .position(|&k| k == key)
            .and_then(|i| HeadingLevel::from_rank(i + 1))
    }

    /// Heading level of a line.
    pub fn level_of(&self, line: &Line) -> Option<HeadingLevel> {
        self.level(line.avg_font_size)
    }

    /// Whether the size is one of the ranked heading sizes.
    pub fn contains(&self, font_size: f32) -> bool {
        self.ranked.contains(&size_key(font_size))
    }

    /// Ranked sizes in points, largest first.
    pub fn sizes(&self) -> Vec<f32> {
        self.ranked.iter().map(|&k| k as f32 / 10.0).collect()
    }

    /// Number of available levels.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether the document has no sizes at all.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, size: f32) -> Line {
        Line::new(1, text, size, 0.0)
    }

    #[test]
    fn test_top_three_sizes() {
        let lines = vec![
            line("body", 10.0),
            line("h3", 12.0),
            line("h1", 24.0),
            line("h2", 16.0),
            line("body again", 10.0),
        ];
        let sizes = HeadingSizes::from_lines(&lines);
        assert_eq!(sizes.sizes(), vec![24.0, 16.0, 12.0]);
        assert_eq!(sizes.level(24.0), Some(HeadingLevel::H1));
        assert_eq!(sizes.level(16.0), Some(HeadingLevel::H2));
        assert_eq!(sizes.level(12.0), Some(HeadingLevel::H3));
        assert_eq!(sizes.level(10.0), None);
        assert!(!sizes.contains(10.0));
    }

    #[test]
    fn test_fewer_than_three_sizes() {
        let lines = vec![line("a", 14.0), line("b", 11.0), line("c", 14.0)];
        let sizes = HeadingSizes::from_lines(&lines);
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.level(11.0), Some(HeadingLevel::H2));
    }

    #[test]
    fn test_same_rounded_size_same_level() {
        let lines = vec![line("a", 13.96), line("b", 14.04), line("c", 9.0)];
        let sizes = HeadingSizes::from_lines(&lines);
        assert_eq!(sizes.level_of(&lines[0]), sizes.level_of(&lines[1]));
        assert_eq!(sizes.len(), 2);
    }

    #[test]
    fn test_empty_document() {
        let sizes = HeadingSizes::from_lines(&[]);
        assert!(sizes.is_empty());
        assert_eq!(sizes.level(12.0), None);
    }
}
