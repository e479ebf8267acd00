//! Rendering module for writing outlines and reports.

mod json;

pub use json::{to_json, write_json, JsonFormat};
