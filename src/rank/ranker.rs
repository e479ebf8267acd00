//! Relevance ranking of candidate sections against a persona query.

use std::collections::HashSet;

use super::embed::{check_batch, cosine_similarity, Embedder};
use crate::error::{Error, Result};
use crate::model::{DocumentSections, RankedSection};
use crate::sections::HeadingNormalizer;

/// Default number of selected sections.
pub const DEFAULT_TOP_SECTIONS: usize = 5;

/// The persona/task query and its embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// `"{role}. {task}"`
    pub text: String,
    /// Embedding of `text`
    pub vector: Vec<f32>,
}

impl Query {
    /// Build the query text from a persona role and a task.
    pub fn text_for(role: &str, task: &str) -> String {
        format!("{}. {}", role, task)
    }

    /// Build and embed the query.
    pub fn new(role: &str, task: &str, embedder: &dyn Embedder) -> Result<Self> {
        let text = Self::text_for(role, task);
        let vector = embedder.embed_one(&text)?;
        Ok(Self { text, vector })
    }
}

/// Selects the most query-relevant sections, at most one per document.
pub struct SectionRanker<'a> {
    embedder: &'a dyn Embedder,
    normalizer: HeadingNormalizer,
    top_sections: usize,
}

impl<'a> SectionRanker<'a> {
    /// Create a ranker backed by an embedder.
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self {
            embedder,
            normalizer: HeadingNormalizer::new(),
            top_sections: DEFAULT_TOP_SECTIONS,
        }
    }

    /// Set the number of sections to select.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Rank all candidate sections.
    ///
    /// Titles are embedded in one batch and sorted by similarity to the
    /// query, highest first; equal scores keep candidate order. Walking that
    /// order, a section is accepted only if its document has no accepted
    /// section yet. Accepted titles are normalized and numbered from 1.
    pub fn rank(
        &self,
        query: &Query,
        candidates: &[DocumentSections],
    ) -> Result<Vec<RankedSection>> {
        let flat: Vec<_> = candidates
            .iter()
            .flat_map(|doc| doc.sections.iter().map(move |s| (doc.document.as_str(), s)))
            .collect();
        if flat.is_empty() {
            return Err(Error::NoHeadings);
        }

        let titles: Vec<&str> = flat.iter().map(|(_, s)| s.title.as_str()).collect();
        let vectors = self.embedder.embed(&titles)?;
        check_batch(&vectors, titles.len())?;

        let mut scored: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(&query.vector, v)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut seen: HashSet<&str> = HashSet::new();
        let mut ranked = Vec::new();
        for (i, score) in scored {
            if ranked.len() == self.top_sections {
                break;
            }
            let (document, section) = flat[i];
            if !seen.insert(document) {
                continue;
            }
            let mut section = section.clone();
            section.title = self.normalizer.normalize(&section.title);
            ranked.push(RankedSection {
                document: document.to_string(),
                section,
                score,
                importance_rank: ranked.len() + 1,
            });
        }

        log::info!(
            "Selected {} of {} candidate sections",
            ranked.len(),
            flat.len()
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    /// Scores titles by a number embedded in them: "T7" → [7, 1].
    struct NumberEmbedder;

    impl Embedder for NumberEmbedder {
        fn dimensions(&self) -> usize {
            2
        }

        fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let n: f32 = t
                        .chars()
                        .filter(|c| c.is_ascii_digit())
                        .collect::<String>()
                        .parse()
                        .unwrap_or(0.0);
                    vec![n, 10.0]
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

    fn doc(name: &str, titles: &[&str]) -> DocumentSections {
        DocumentSections {
            document: name.to_string(),
            sections: titles.iter().map(|t| Section::new(*t, 1)).collect(),
        }
    }

    #[test]
    fn test_query_text() {
        assert_eq!(
            Query::text_for("Travel Planner", "Plan a trip"),
            "Travel Planner. Plan a trip"
        );
        let q = Query::new("A", "B", &NumberEmbedder).unwrap();
        assert_eq!(q.text, "A. B");
        assert_eq!(q.vector.len(), 2);
    }

    #[test]
    fn test_one_section_per_document() {
        let candidates = vec![
            doc("a.pdf", &["Title 90", "Title 80"]),
            doc("b.pdf", &["Title 70"]),
            doc("c.pdf", &["Title 10"]),
        ];
        let ranked = SectionRanker::new(&NumberEmbedder)
            .rank(&query(), &candidates)
            .unwrap();
        let picked: Vec<(&str, &str)> = ranked
            .iter()
            .map(|r| (r.document.as_str(), r.section.title.as_str()))
            .collect();
        assert_eq!(
            picked,
            vec![("a.pdf", "Title 90"), ("b.pdf", "Title 70"), ("c.pdf", "Title 10")]
        );
        let ranks: Vec<usize> = ranked.iter().map(|r| r.importance_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_selection_stops_at_limit() {
        let candidates: Vec<_> = (1..=7)
            .map(|i| doc(&format!("d{}.pdf", i), &[&format!("Part {}", i * 10)]))
            .collect();
        let ranked = SectionRanker::new(&NumberEmbedder)
            .rank(&query(), &candidates)
            .unwrap();
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].document, "d7.pdf");
        let docs: HashSet<&str> = ranked.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(docs.len(), 5);

        let ranked = SectionRanker::new(&NumberEmbedder)
            .with_top_sections(2)
            .rank(&query(), &candidates)
            .unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_titles_are_normalized() {
        let candidates = vec![doc("a.pdf", &["BEACH 5: north shore"])];
        let ranked = SectionRanker::new(&NumberEmbedder)
            .rank(&query(), &candidates)
            .unwrap();
        assert_eq!(ranked[0].section.title, "Beach 5");
    }

    #[test]
    fn test_no_candidates() {
        let candidates = vec![doc("a.pdf", &[]), doc("b.pdf", &[])];
        let err = SectionRanker::new(&NumberEmbedder)
            .rank(&query(), &candidates)
            .unwrap_err();
        assert!(matches!(err, Error::NoHeadings));
    }

    #[test]
    fn test_short_batch_is_an_error() {
        struct Broken;
        impl Embedder for Broken {
            fn dimensions(&self) -> usize {
                1
            }
            fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
                Ok(vec![])
            }
        }
        let err = SectionRanker::new(&Broken)
            .rank(&query(), &[doc("a.pdf", &["X"])])
            .unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }
}
