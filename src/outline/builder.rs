//! Outline assembly: title selection and de-duplicated heading list.

use std::collections::HashSet;

use super::sizes::HeadingSizes;
use crate::model::{DocumentOutline, Line, OutlineEntry};
use crate::parser::{extract_lines, ClusterOptions, LayoutSource};

/// Builds a [`DocumentOutline`] from a document's lines.
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    cluster: ClusterOptions,
}

impl OutlineBuilder {
    /// Create a builder with the outline clustering parameters.
    pub fn new() -> Self {
        Self {
            cluster: ClusterOptions::outline(),
        }
    }

    /// Override the clustering parameters.
    pub fn with_cluster_options(mut self, options: ClusterOptions) -> Self {
        self.cluster = options;
        self
    }

    /// Clustering parameters in use.
    pub fn cluster_options(&self) -> &ClusterOptions {
        &self.cluster
    }

    /// Extract lines from a source and build its outline.
    pub fn extract<S: LayoutSource + ?Sized>(
        &self,
        source: &S,
        fallback_title: &str,
    ) -> DocumentOutline {
        let lines = extract_lines(source, &self.cluster);
        self.build(&lines, fallback_title)
    }

    /// Build an outline from lines in document order.
    ///
    /// Every line whose size ranks among the top three becomes an entry,
    /// unless an entry with identical text was already emitted.
    pub fn build(&self, lines: &[Line], fallback_title: &str) -> DocumentOutline {
        let sizes = HeadingSizes::from_lines(lines);
        let title = select_title(lines, fallback_title);

        let mut seen: HashSet<&str> = HashSet::new();
        let outline = lines
            .iter()
            .filter_map(|line| {
                let level = sizes.level_of(line)?;
                if !seen.insert(line.text.as_str()) {
                    return None;
                }
                Some(OutlineEntry {
                    level,
                    text: line.text.clone(),
                    page: line.page,
                })
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Outline '{}': {} headings over sizes {:?}",
            title,
            outline.len(),
            sizes.sizes()
        );

        DocumentOutline { title, outline }
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The topmost line of page 1, or the fallback when page 1 has no lines.
///
/// Ties on `avg_y0` keep the earliest line.
pub fn select_title(lines: &[Line], fallback: &str) -> String {
    lines
        .iter()
        .filter(|line| line.page == 1)
        .fold(None::<&Line>, |best, line| match best {
            Some(b) if b.avg_y0 <= line.avg_y0 => Some(b),
            _ => Some(line),
        })
        .map(|line| line.text.clone())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_title_is_topmost_first_page_line() {
        let lines = vec![
            Line::new(1, "Body", 10.0, 120.0),
            Line::new(1, "Report Title", 20.0, 45.0),
            Line::new(1, "Footer", 8.0, 200.0),
            Line::new(2, "Higher On Page Two", 20.0, 10.0),
        ];
        assert_eq!(select_title(&lines, "stem"), "Report Title");
    }

    #[test]
    fn test_title_falls_back_to_stem() {
        let lines = vec![Line::new(2, "Late Start", 20.0, 10.0)];
        assert_eq!(select_title(&lines, "annual-report"), "annual-report");
        assert_eq!(select_title(&[], "empty"), "empty");
    }

    #[test]
    fn test_title_tie_keeps_first() {
        let lines = vec![
            Line::new(1, "Left", 12.0, 50.0),
            Line::new(1, "Right", 12.0, 50.0),
        ];
        assert_eq!(select_title(&lines, "x"), "Left");
    }

    #[test]
    fn test_outline_levels_and_dedup() {
        let lines = vec![
            Line::new(1, "Annual Report", 24.0, 40.0),
            Line::new(1, "Introduction", 18.0, 90.0),
            Line::new(1, "Some body text here.", 10.0, 120.0),
            Line::new(2, "Scope", 14.0, 60.0),
            Line::new(2, "Introduction", 18.0, 80.0),
            Line::new(3, "Annual Report", 24.0, 20.0),
        ];
        let outline = OutlineBuilder::new().build(&lines, "stem");

        assert_eq!(outline.title, "Annual Report");
        let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Annual Report", "Introduction", "Scope"]);
        assert_eq!(outline.outline[0].level, HeadingLevel::H1);
        assert_eq!(outline.outline[1].level, HeadingLevel::H2);
        assert_eq!(outline.outline[2].level, HeadingLevel::H3);
        assert_eq!(outline.outline[2].page, 2);
    }

    #[test]
    fn test_empty_lines_give_empty_outline() {
        let outline = OutlineBuilder::default().build(&[], "missing");
        assert_eq!(outline.title, "missing");
        assert!(outline.is_empty());
    }
}
