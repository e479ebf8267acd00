//! Persona-driven relevance ranking.
//!
//! Section titles and sentences are scored by cosine similarity between
//! their embeddings and the embedding of the persona/task query.

mod embed;
#[cfg(feature = "minilm")]
mod minilm;
mod ranker;
mod refine;

pub use embed::{cosine_similarity, Embedder, HashingEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
#[cfg(feature = "minilm")]
pub use minilm::{MiniLmEmbedder, DEFAULT_MODEL_ID};
pub use ranker::{Query, SectionRanker, DEFAULT_TOP_SECTIONS};
pub use refine::{SentenceRefiner, DEFAULT_TOP_SENTENCES};
