//! Section segmentation for persona-driven analysis.

mod normalize;
mod segmenter;

pub use normalize::HeadingNormalizer;
pub use segmenter::SectionSegmenter;
