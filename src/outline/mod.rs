//! Heading outline extraction.
//!
//! Heading levels come from relative font size alone: the three largest
//! distinct sizes in a document are H1, H2 and H3.

mod builder;
mod sizes;

pub use builder::{select_title, OutlineBuilder};
pub use sizes::HeadingSizes;
