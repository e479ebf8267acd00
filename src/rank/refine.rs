//! Sentence-level refinement of selected sections.

use regex::Regex;

use super::embed::{check_batch, cosine_similarity, Embedder};
use super::ranker::Query;
use crate::error::Result;
use crate::model::{RankedSection, RefinedExcerpt};

/// Default number of sentences kept per section.
pub const DEFAULT_TOP_SENTENCES: usize = 3;

/// Keeps the most query-relevant sentences of a section, in reading order.
pub struct SentenceRefiner<'a> {
    embedder: &'a dyn Embedder,
    top_sentences: usize,
    sentence_end: Regex,
}

impl<'a> SentenceRefiner<'a> {
    /// Create a refiner backed by an embedder.
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self {
            embedder,
            top_sentences: DEFAULT_TOP_SENTENCES,
            sentence_end: Regex::new(r"[.!?]\s+").unwrap(),
        }
    }

    /// Set the number of sentences to keep.
    pub fn with_top_sentences(mut self, n: usize) -> Self {
        self.top_sentences = n;
        self
    }

    /// Split text after each `.`, `!` or `?` followed by whitespace.
    ///
    /// Fragments are trimmed and empty ones dropped.
    pub fn split_sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        for m in self.sentence_end.find_iter(text) {
            // The terminator is ASCII, one byte.
            sentences.push(&text[start..m.start() + 1]);
            start = m.end();
        }
        sentences.push(&text[start..]);

        sentences
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Refine a ranked section.
    ///
    /// `page_text` supplies the plain text of the section's page and is
    /// only called when the section body is empty.
    pub fn refine<F>(
        &self,
        query: &Query,
        ranked: &RankedSection,
        page_text: F,
    ) -> Result<RefinedExcerpt>
    where
        F: FnOnce() -> Result<String>,
    {
        let mut content = ranked.section.content.trim().to_string();
        if content.is_empty() {
            content = match page_text() {
                Ok(text) => text.replace('\n', " ").trim().to_string(),
                Err(e) => {
                    log::warn!(
                        "No page text for {} page {}: {}",
                        ranked.document,
                        ranked.section.page,
                        e
                    );
                    String::new()
                }
            };
        }

        let text = self.select(query, &content)?;
        Ok(RefinedExcerpt {
            document: ranked.document.clone(),
            page: ranked.section.page,
            text,
        })
    }

    /// Pick the top sentences of `content` and join them in original order.
    pub fn select(&self, query: &Query, content: &str) -> Result<String> {
        let sentences = self.split_sentences(content);
        if sentences.is_empty() {
            return Ok(content.to_string());
        }

        let vectors = self.embedder.embed(&sentences)?;
        check_batch(&vectors, sentences.len())?;

        let mut order: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(&query.vector, v)))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut picked: Vec<usize> = order
            .into_iter()
            .take(self.top_sentences.min(sentences.len()))
            .map(|(i, _)| i)
            .collect();
        picked.sort_unstable();

        Ok(picked
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Section;

    /// Scores each sentence by a fixed table keyed on its first word.
    struct TableEmbedder;

    impl Embedder for TableEmbedder {
        fn dimensions(&self) -> usize {
            2
        }

        fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let score = match t.split_whitespace().next().unwrap_or("") {
                        "Zero" => 0.8,
                        "One" => 0.1,
                        "Two" => 0.7,
                        "Three" => 0.9,
                        "Four" => 0.2,
                        _ => 0.0,
                    };
                    vec![score, 1.0 - score]
                })
                .collect())
        }
    }

    fn query() -> Query {
        Query {
            text: "q".to_string(),
            vector: vec![1.0, 0.0],
        }
    }

    fn ranked(content: &str) -> RankedSection {
        let mut section = Section::new("Heading", 4);
        section.content = content.to_string();
        RankedSection {
            document: "guide.pdf".to_string(),
            section,
            score: 0.5,
            importance_rank: 1,
        }
    }

    #[test]
    fn test_split_sentences() {
        let refiner = SentenceRefiner::new(&TableEmbedder);
        assert_eq!(
            refiner.split_sentences("First one. Second!  Third? trailing"),
            vec!["First one.", "Second!", "Third?", "trailing"]
        );
        assert_eq!(refiner.split_sentences("v1.2 stays whole."), vec!["v1.2 stays whole."]);
        assert!(refiner.split_sentences("   ").is_empty());
    }

    #[test]
    fn test_selection_keeps_reading_order() {
        let refiner = SentenceRefiner::new(&TableEmbedder);
        let content = "Zero a. One b. Two c. Three d. Four e. ";
        let excerpt = refiner
            .refine(&query(), &ranked(content), || unreachable!())
            .unwrap();
        assert_eq!(excerpt.text, "Zero a. Two c. Three d.");
        assert_eq!(excerpt.document, "guide.pdf");
        assert_eq!(excerpt.page, 4);
    }

    #[test]
    fn test_fewer_sentences_than_k() {
        let refiner = SentenceRefiner::new(&TableEmbedder).with_top_sentences(3);
        let excerpt = refiner
            .refine(&query(), &ranked("Four x. One y."), || unreachable!())
            .unwrap();
        assert_eq!(excerpt.text, "Four x. One y.");
    }

    #[test]
    fn test_empty_content_uses_page_text() {
        let refiner = SentenceRefiner::new(&TableEmbedder).with_top_sentences(1);
        let excerpt = refiner
            .refine(&query(), &ranked("   "), || {
                Ok("One line\nbreaks. Three\nwins. ".to_string())
            })
            .unwrap();
        assert_eq!(excerpt.text, "Three wins.");
    }

    #[test]
    fn test_page_text_failure_gives_empty_excerpt() {
        let refiner = SentenceRefiner::new(&TableEmbedder);
        let excerpt = refiner
            .refine(&query(), &ranked(""), || Err(Error::PageOutOfRange(9, 2)))
            .unwrap();
        assert_eq!(excerpt.text, "");
    }
}
