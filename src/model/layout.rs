//! Positional text types: spans as reported by the text layer, and the
//! visual lines clustered from them.

use serde::{Deserialize, Serialize};

/// Round a font size or coordinate to one decimal place.
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Integer key of a size in tenths of a point.
///
/// Two sizes with the same one-decimal rounding share a key, so keys can
/// be compared and hashed exactly.
pub fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// A filtered text span on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Page number (1-indexed)
    pub page: u32,
    /// Trimmed text content
    pub text: String,
    /// Font size in points, rounded to one decimal
    pub font_size: f32,
    /// Left edge
    pub x0: f32,
    /// Top edge (y grows downward)
    pub y0: f32,
}

impl Span {
    /// Create a new span, rounding the font size to one decimal.
    pub fn new(page: u32, text: impl Into<String>, font_size: f32, x0: f32, y0: f32) -> Self {
        Self {
            page,
            text: text.into(),
            font_size: round_tenth(font_size),
            x0,
            y0,
        }
    }

    /// Whether the span is a single character (spaced-out heading artifact).
    pub fn is_single_char(&self) -> bool {
        self.text.chars().count() == 1
    }
}

/// A visual line built from spans sharing a page and a vertical position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Page number (1-indexed)
    pub page: u32,
    /// Joined text, spans in left-to-right order
    pub text: String,
    /// Mean font size of the spans, rounded to one decimal
    pub avg_font_size: f32,
    /// Mean top edge of the spans
    pub avg_y0: f32,
}

impl Line {
    /// Create a new line.
    pub fn new(page: u32, text: impl Into<String>, avg_font_size: f32, avg_y0: f32) -> Self {
        Self {
            page,
            text: text.into(),
            avg_font_size: round_tenth(avg_font_size),
            avg_y0,
        }
    }

    /// Size key of this line (tenths of a point).
    pub fn size_key(&self) -> i32 {
        size_key(self.avg_font_size)
    }

    /// Whitespace-delimited words of the line.
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(11.96), 12.0);
        assert_eq!(round_tenth(9.04), 9.0);
        assert_eq!(round_tenth(14.25), 14.3);
    }

    #[test]
    fn test_size_key_matches_rounding() {
        assert_eq!(size_key(12.0), 120);
        assert_eq!(size_key(round_tenth(11.96)), size_key(12.0));
        assert_ne!(size_key(12.1), size_key(12.0));
    }

    #[test]
    fn test_span_rounds_font_size() {
        let span = Span::new(1, "Intro", 17.96, 72.0, 100.0);
        assert_eq!(span.font_size, 18.0);
        assert!(!span.is_single_char());
        assert!(Span::new(1, "É", 12.0, 0.0, 0.0).is_single_char());
    }

    #[test]
    fn test_line_words() {
        let line = Line::new(2, "Getting  Started Guide", 14.04, 80.0);
        assert_eq!(line.words(), vec!["Getting", "Started", "Guide"]);
        assert_eq!(line.avg_font_size, 14.0);
        assert_eq!(line.size_key(), 140);
    }
}
