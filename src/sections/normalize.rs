//! Heading cleanup for selected section titles.

use regex::Regex;

/// Turns raw heading lines into short canonical titles.
///
/// Trailing `.`, `:` and `;` are stripped, only the text before the first
/// colon, hyphen or en-dash is kept, and each word is capitalized.
#[derive(Debug, Clone)]
pub struct HeadingNormalizer {
    clause_separator: Regex,
}

impl HeadingNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self {
            clause_separator: Regex::new(r"[:\-–]").unwrap(),
        }
    }

    /// Normalize a heading.
    pub fn normalize(&self, heading: &str) -> String {
        let stripped = heading.trim_end_matches(['.', ':', ';']);
        let clause = self
            .clause_separator
            .split(stripped)
            .next()
            .unwrap_or(stripped)
            .trim();

        clause
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for HeadingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Titlecase the first character, lowercase the rest.
///
/// A first character whose uppercase form expands (`ß` to `SS`) keeps only
/// the leading uppercase letter; the expansion tail is lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    upper
        .next()
        .into_iter()
        .chain(upper.flat_map(char::to_lowercase))
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_punctuation() {
        let n = HeadingNormalizer::new();
        assert_eq!(n.normalize("Travel Tips.;"), "Travel Tips");
        assert_eq!(n.normalize("Packing List:"), "Packing List");
    }

    #[test]
    fn test_first_clause_only() {
        let n = HeadingNormalizer::new();
        assert_eq!(n.normalize("Nice: A Coastal Gem"), "Nice");
        assert_eq!(n.normalize("Cuisine - Local Dishes"), "Cuisine");
        assert_eq!(n.normalize("Marseille – Old Port"), "Marseille");
        assert_eq!(n.normalize("Day-Trips From Lyon"), "Day");
    }

    #[test]
    fn test_capitalize_words() {
        let n = HeadingNormalizer::new();
        assert_eq!(n.normalize("COMPREHENSIVE GUIDE to   cities"), "Comprehensive Guide To Cities");
        assert_eq!(n.normalize("éTÉ en provence"), "Été En Provence");
    }

    #[test]
    fn test_leading_separator_gives_empty_title() {
        let n = HeadingNormalizer::new();
        assert_eq!(n.normalize("- bullet heading"), "");
        assert_eq!(n.normalize(": Overview"), "");
        assert_eq!(n.normalize(""), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize("ß"), "Ss");
        assert_eq!(capitalize("ßtraße"), "Sstraße");
        assert_eq!(capitalize(""), "");
    }
}
