//! Sentence-embedding collaborator.

use crate::error::{Error, Result};

/// Dimension of [`HashingEmbedder`] vectors.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

/// Maps a batch of strings to fixed-length vectors.
///
/// Implementations must return exactly one vector per input, in input
/// order, all with the same dimension. A model-backed embedder is expensive
/// to create, so one instance is built per run and passed by reference.
pub trait Embedder: Send + Sync {
    /// Vector dimension.
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text])?
            .pop()
            .ok_or_else(|| Error::Embedding("embedder returned no vector".to_string()))
    }
}

/// Check that an embedder answered a batch of `expected` texts correctly.
pub(crate) fn check_batch(vectors: &[Vec<f32>], expected: usize) -> Result<()> {
    if vectors.len() != expected {
        return Err(Error::Embedding(format!(
            "expected {} vectors, got {}",
            expected,
            vectors.len()
        )));
    }
    Ok(())
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Scale a vector to unit length; zero vectors are left as they are.
pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
}

/// Deterministic feature-hashing embedder.
///
/// Each text is lowercased; its words and the character trigrams of each
/// padded word are hashed (FNV-1a) into signed buckets and the result is
/// L2-normalized. Texts sharing vocabulary or word stems score high; it
/// measures overlap, not meaning. Used offline and in tests where a
/// sentence model is unavailable.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
    ngram: usize,
}

impl HashingEmbedder {
    /// Create an embedder with the default dimension.
    pub fn new() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            ngram: 3,
        }
    }

    /// Set the vector dimension.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions.max(1);
        self
    }

    /// Set the character n-gram length.
    pub fn with_ngram(mut self, ngram: usize) -> Self {
        self.ngram = ngram.max(1);
        self
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let lowered = text.to_lowercase();

        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            self.add_feature(&mut vector, word.as_bytes(), 1.0);

            let padded: Vec<char> = std::iter::once(' ')
                .chain(word.chars())
                .chain(std::iter::once(' '))
                .collect();
            if padded.len() < self.ngram {
                continue;
            }
            for gram in padded.windows(self.ngram) {
                let gram: String = gram.iter().collect();
                self.add_feature(&mut vector, gram.as_bytes(), 0.5);
            }
        }

        l2_normalize(&mut vector);
        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &[u8], weight: f32) {
        let hash = fnv1a(feature);
        let index = (hash % self.dimensions as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for HashingEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_hashing_embedder_shape() {
        let embedder = HashingEmbedder::new();
        let vectors = embedder.embed(&["Coastal hiking", "", "Nightlife"]).unwrap();
        assert_eq!(vectors.len(), 3);
        assert!(vectors.iter().all(|v| v.len() == DEFAULT_EMBEDDING_DIMENSIONS));
        assert!(vectors[1].iter().all(|&v| v == 0.0));

        let norm: f32 = vectors[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hashing_embedder_is_deterministic() {
        let embedder = HashingEmbedder::new();
        let a = embedder.embed_one("Plan a trip for college friends").unwrap();
        let b = embedder.embed_one("Plan a trip for college friends").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_vocabulary_scores_higher() {
        let embedder = HashingEmbedder::new();
        let query = embedder
            .embed_one("Travel Planner. Plan a trip of 4 days for a group of friends")
            .unwrap();
        let related = embedder.embed_one("Planning A Group Trip").unwrap();
        let unrelated = embedder.embed_one("Chemical Safety Data").unwrap();
        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[test]
    fn test_check_batch() {
        assert!(check_batch(&[vec![1.0]], 1).is_ok());
        assert!(matches!(check_batch(&[], 2), Err(Error::Embedding(_))));
    }
}
