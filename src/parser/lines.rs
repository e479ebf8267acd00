//! Line clustering: group a page's spans into visual lines by vertical
//! proximity.
//!
//! Clustering is a pure function of one page's spans, so pages are
//! clustered in parallel and concatenated in page order.

use rayon::prelude::*;

use super::options::{BucketAnchor, ClusterOptions, JoinRule};
use super::spans::has_letter;
use crate::model::{Line, Span};

/// Group one page's spans into lines, top to bottom.
///
/// Spans are scanned in ascending `y0`; a span joins the open bucket when
/// its `y0` is strictly within the tolerance of the bucket anchor, and
/// opens a new bucket otherwise.
pub fn cluster_lines(mut spans: Vec<Span>, options: &ClusterOptions) -> Vec<Line> {
    spans.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let mut buckets: Vec<Vec<Span>> = Vec::new();
    for span in spans {
        match buckets.last_mut() {
            Some(bucket)
                if (anchor_y(bucket, options.anchor) - span.y0).abs() < options.y_tolerance =>
            {
                bucket.push(span)
            }
            _ => buckets.push(vec![span]),
        }
    }

    buckets
        .into_iter()
        .filter_map(|bucket| build_line(bucket, options.join_rule))
        .collect()
}

/// Cluster every page of a document, preserving page order.
pub fn cluster_document(pages: Vec<Vec<Span>>, options: &ClusterOptions) -> Vec<Line> {
    let per_page: Vec<Vec<Line>> = pages
        .into_par_iter()
        .map(|spans| cluster_lines(spans, options))
        .collect();
    per_page.into_iter().flatten().collect()
}

fn anchor_y(bucket: &[Span], anchor: BucketAnchor) -> f32 {
    let span = match anchor {
        BucketAnchor::First => bucket.first(),
        BucketAnchor::Latest => bucket.last(),
    };
    span.map(|s| s.y0).unwrap_or(f32::NAN)
}

/// Collapse a bucket into a line; `None` if the joined text has no letter.
fn build_line(mut bucket: Vec<Span>, join_rule: JoinRule) -> Option<Line> {
    let first = bucket.first()?;
    let page = first.page;

    bucket.sort_by(|a, b| a.x0.total_cmp(&b.x0));

    let separator = if join_rule.is_char_run(bucket.iter().map(|s| s.text.as_str())) {
        ""
    } else {
        " "
    };
    let text = bucket
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(separator);
    let text = text.trim();
    if !has_letter(text) {
        return None;
    }

    let count = bucket.len() as f32;
    let avg_size = bucket.iter().map(|s| s.font_size).sum::<f32>() / count;
    let avg_y0 = bucket.iter().map(|s| s.y0).sum::<f32>() / count;

    Some(Line::new(page, text, avg_size, avg_y0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32, x0: f32, y0: f32) -> Span {
        Span::new(1, text, size, x0, y0)
    }

    #[test]
    fn test_groups_by_y_and_orders_by_x() {
        let spans = vec![
            span("world", 12.0, 150.0, 100.5),
            span("Second", 12.0, 72.0, 120.0),
            span("Hello", 12.0, 72.0, 100.0),
        ];
        let lines = cluster_lines(spans, &ClusterOptions::outline());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello world");
        assert!((lines[0].avg_y0 - 100.25).abs() < 1e-4);
        assert_eq!(lines[1].text, "Second");
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        let spans = vec![span("Top", 12.0, 72.0, 100.0), span("Low", 12.0, 72.0, 102.0)];
        let lines = cluster_lines(spans, &ClusterOptions::outline());
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_section_tolerance_is_looser() {
        let spans = vec![span("Top", 12.0, 72.0, 100.0), span("Low", 12.0, 150.0, 102.5)];
        assert_eq!(cluster_lines(spans.clone(), &ClusterOptions::outline()).len(), 2);
        assert_eq!(cluster_lines(spans, &ClusterOptions::sections()).len(), 1);
    }

    #[test]
    fn test_latest_anchor_chains_spans() {
        let spans = vec![
            span("a", 12.0, 0.0, 100.0),
            span("b", 12.0, 10.0, 102.0),
            span("c", 12.0, 20.0, 104.0),
        ];
        let chained = cluster_lines(
            spans.clone(),
            &ClusterOptions::sections().with_y_tolerance(2.5),
        );
        assert_eq!(chained.len(), 1);
        let anchored = cluster_lines(spans, &ClusterOptions::outline().with_y_tolerance(2.5));
        assert_eq!(anchored.len(), 2);
    }

    #[test]
    fn test_character_run_join() {
        let spans = vec![
            span("P", 20.0, 30.0, 50.0),
            span("R", 20.0, 10.0, 50.0),
            span("O", 20.0, 20.0, 50.0),
        ];
        let lines = cluster_lines(spans, &ClusterOptions::outline());
        assert_eq!(lines[0].text, "ROP");
    }

    #[test]
    fn test_two_single_chars_use_spaces_in_outline() {
        let spans = vec![span("A", 20.0, 10.0, 50.0), span("B", 20.0, 20.0, 50.0)];
        let lines = cluster_lines(spans.clone(), &ClusterOptions::outline());
        assert_eq!(lines[0].text, "A B");
        let lines = cluster_lines(spans, &ClusterOptions::sections());
        assert_eq!(lines[0].text, "AB");
    }

    #[test]
    fn test_average_size_is_rounded() {
        let spans = vec![span("Mixed", 12.0, 0.0, 10.0), span("sizes", 13.0, 40.0, 10.0)];
        let lines = cluster_lines(spans, &ClusterOptions::outline());
        assert_eq!(lines[0].avg_font_size, 12.5);
    }

    #[test]
    fn test_cluster_document_keeps_page_order() {
        let pages = vec![
            vec![Span::new(1, "First page", 12.0, 0.0, 300.0)],
            vec![Span::new(2, "Second page", 12.0, 0.0, 10.0)],
        ];
        let lines = cluster_document(pages, &ClusterOptions::outline());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page, 1);
        assert_eq!(lines[1].page, 2);
    }

    #[test]
    fn test_empty_page() {
        assert!(cluster_lines(Vec::new(), &ClusterOptions::sections()).is_empty());
    }
}
