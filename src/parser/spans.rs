//! Span collection: filter raw text-layer spans down to lettered text.

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use super::backend::{LayoutSource, RawSpan};
use crate::error::Result;
use crate::model::Span;

/// Whether the text contains at least one letter (general category `L*`),
/// in any script.
///
/// Pure punctuation, digits, letter-like numerals and lone combining marks
/// are rejected.
pub fn has_letter(text: &str) -> bool {
    text.chars()
        .any(|c| c.general_category_group() == GeneralCategoryGroup::Letter)
}

/// Filter one page's raw spans.
///
/// Text is NFC-normalized and trimmed; spans that end up empty or without
/// a letter are dropped. Font sizes are rounded to one decimal.
pub fn collect_spans(page: u32, raw: impl IntoIterator<Item = RawSpan>) -> Vec<Span> {
    raw.into_iter()
        .filter_map(|span| {
            let text: String = span.text.nfc().collect();
            let text = text.trim();
            if text.is_empty() || !has_letter(text) {
                return None;
            }
            Some(Span::new(
                page,
                text,
                span.font_size,
                span.bbox.x0,
                span.bbox.y0,
            ))
        })
        .collect()
}

/// Collect the filtered spans of every page, in page order.
///
/// Pages whose text layer fails are logged and contribute no spans.
pub fn collect_document_spans<S: LayoutSource + ?Sized>(source: &S) -> Vec<Vec<Span>> {
    (1..=source.page_count())
        .map(|page| match source.page_spans(page) {
            Ok(raw) => collect_spans(page, raw),
            Err(e) => {
                log::warn!("Skipping text of page {}: {}", page, e);
                Vec::new()
            }
        })
        .collect()
}

/// Plain text of a page with line breaks folded into spaces.
pub fn page_plain_text<S: LayoutSource + ?Sized>(source: &S, page: u32) -> Result<String> {
    let text = source.page_text(page)?;
    Ok(text.replace('\n', " ").trim().to_string())
}
