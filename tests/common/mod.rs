//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdfsense::parser::RawSpan;
use pdfsense::{DocumentStore, Error, LayoutSource, Result};

/// A text run placed on a page: text, font size, x, baseline y (PDF space).
pub type Run<'a> = (&'a str, f32, f32, f32);

/// Build a PDF with one content stream per page, Helvetica throughout.
pub fn build_pdf(pages: &[Vec<Run>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for runs in pages {
        let mut operations = Vec::new();
        for (text, size, x, y) in runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// In-memory layout source: pages of raw spans, y growing downward.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub pages: Vec<Vec<RawSpan>>,
}

impl MemorySource {
    pub fn new(pages: Vec<Vec<RawSpan>>) -> Self {
        Self { pages }
    }
}

impl LayoutSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_spans(&self, page: u32) -> Result<Vec<RawSpan>> {
        self.pages
            .get((page as usize).wrapping_sub(1))
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let spans = self.page_spans(page)?;
        Ok(spans
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// In-memory document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: HashMap<String, MemorySource>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, source: MemorySource) {
        self.docs.insert(name.to_string(), source);
    }
}

impl DocumentStore for MemoryStore {
    fn open(&self, filename: &str) -> Result<Box<dyn LayoutSource>> {
        self.docs
            .get(filename)
            .cloned()
            .map(|s| Box::new(s) as Box<dyn LayoutSource>)
            .ok_or_else(|| Error::Other(format!("{} not found", filename)))
    }
}

/// One page with a heading and a body paragraph, laid out top-down.
pub fn heading_page(heading: &str, body: &[&str]) -> Vec<RawSpan> {
    let mut spans = vec![RawSpan::at(heading, 18.0, 72.0, 60.0)];
    for (i, line) in body.iter().enumerate() {
        spans.push(RawSpan::at(*line, 10.0, 72.0, 100.0 + 14.0 * i as f32));
    }
    spans
}
