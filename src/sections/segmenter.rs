//! Section segmentation: detect heading lines and split body text at them.

use std::collections::HashSet;

use crate::model::{Line, Section};
use crate::outline::HeadingSizes;
use crate::parser::{extract_lines, ClusterOptions, HeadingCriteria, LayoutSource};

/// Splits a document into candidate sections.
///
/// A strict pass looks for short Title Case headings in the heading sizes.
/// When it finds fewer sections than the limit, a looser pass accepts any
/// short line in a heading size, and both results are merged.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    cluster: ClusterOptions,
    criteria: HeadingCriteria,
}

impl SectionSegmenter {
    /// Create a segmenter with the section clustering parameters.
    pub fn new() -> Self {
        Self {
            cluster: ClusterOptions::sections(),
            criteria: HeadingCriteria::default(),
        }
    }

    /// Override the heading criteria.
    pub fn with_criteria(mut self, criteria: HeadingCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Override the clustering parameters.
    pub fn with_cluster_options(mut self, options: ClusterOptions) -> Self {
        self.cluster = options;
        self
    }

    /// Heading criteria in use.
    pub fn criteria(&self) -> &HeadingCriteria {
        &self.criteria
    }

    /// Extract lines from a source and segment them.
    pub fn extract<S: LayoutSource + ?Sized>(&self, source: &S) -> Vec<Section> {
        let lines = extract_lines(source, &self.cluster);
        self.segment(&lines)
    }

    /// Segment lines into at most `section_limit` sections.
    pub fn segment(&self, lines: &[Line]) -> Vec<Section> {
        let sizes = HeadingSizes::from_lines(lines);
        let limit = self.criteria.section_limit;

        let mut strict = split_sections(lines, |line| self.is_strict_heading(line, &sizes));
        if strict.len() >= limit {
            strict.truncate(limit);
            return strict;
        }

        let fallback = split_sections(lines, |line| self.is_fallback_heading(line, &sizes));
        log::debug!(
            "Strict pass found {} sections, fallback pass {}",
            strict.len(),
            fallback.len()
        );

        let mut seen: HashSet<String> = HashSet::new();
        strict
            .into_iter()
            .chain(fallback)
            .filter(|section| seen.insert(section.title.clone()))
            .take(limit)
            .collect()
    }

    /// Strict heading test: heading size, word count within bounds, every
    /// word capitalized, short, and no trailing `.`, `:` or `;`.
    pub fn is_strict_heading(&self, line: &Line, sizes: &HeadingSizes) -> bool {
        let words = line.words();
        let text = line.text.as_str();
        sizes.contains(line.avg_font_size)
            && (self.criteria.min_words..=self.criteria.max_words).contains(&words.len())
            && words.iter().all(|w| starts_uppercase(w))
            && text.chars().count() <= self.criteria.max_chars
            && !text
                .chars()
                .last()
                .is_some_and(|c| self.criteria.forbidden_endings.contains(&c))
    }

    /// Fallback heading test: heading size and a short line.
    pub fn is_fallback_heading(&self, line: &Line, sizes: &HeadingSizes) -> bool {
        sizes.contains(line.avg_font_size) && line.words().len() <= self.criteria.fallback_max_words
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a word starts with an uppercase letter.
///
/// Letters from scripts without case (ideographs, kana, Hangul) count as
/// uppercase; digits and punctuation do not.
fn starts_uppercase(word: &str) -> bool {
    word.chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || (c.is_alphabetic() && !c.is_lowercase()))
}

/// Split lines into sections at every line the predicate accepts.
///
/// Lines before the first heading are discarded.
fn split_sections(lines: &[Line], is_heading: impl Fn(&Line) -> bool) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for line in lines {
        if is_heading(line) {
            if let Some(done) = current.replace(Section::new(line.text.clone(), line.page)) {
                sections.push(done);
            }
        } else if let Some(section) = current.as_mut() {
            section.push_line(&line.text);
        }
    }

    sections.extend(current);
    sections
}
