//! Text-layer backend.
//!
//! [`LayoutSource`] is the seam between layout analysis and the PDF library:
//! it yields, per page, the raw text spans with their bounding boxes and
//! font sizes. [`LopdfSource`] implements it by walking page content
//! streams with `lopdf`.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Default page height (US Letter) when no MediaBox can be resolved.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Page-relative rectangle, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// A styled run of text as reported by the text layer, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpan {
    /// Text content, untrimmed
    pub text: String,
    /// Effective font size in points
    pub font_size: f32,
    /// Position on the page
    pub bbox: BoundingBox,
}

impl RawSpan {
    /// Create a raw span at `(x0, y0)` with an empty extent.
    pub fn at(text: impl Into<String>, font_size: f32, x0: f32, y0: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bbox: BoundingBox::new(x0, y0, x0, y0),
        }
    }
}

/// Abstract access to a document's text layer.
///
/// Pages are numbered from 1. Implementations must be deterministic: the
/// same document yields the same spans on every call.
pub trait LayoutSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Raw text spans of one page.
    fn page_spans(&self, page: u32) -> Result<Vec<RawSpan>>;

    /// Plain text of one page.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// [`LayoutSource`] backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfSource {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.pages.len() as u32))
    }

    /// Page height from the MediaBox, inherited through the page tree.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        self.doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| self.find_media_box(dict))
            .filter(|b| b.len() >= 4)
            .map(|b| b[3] - b[1])
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    fn find_media_box(&self, dict: &Dictionary) -> Option<Vec<f32>> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            let resolved = match obj {
                Object::Reference(id) => self.doc.get_object(*id).ok()?,
                other => other,
            };
            if let Ok(arr) = resolved.as_array() {
                return Some(arr.iter().filter_map(get_number).collect());
            }
        }

        let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
        let parent_dict = self.doc.get_dictionary(parent).ok()?;
        self.find_media_box(parent_dict)
    }
}

impl LayoutSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_spans(&self, page: u32) -> Result<Vec<RawSpan>> {
        let page_id = self.page_id(page)?;
        let height = self.page_height(page_id);

        let fonts = self.doc.get_page_fonts(page_id)?;

        let data = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&data).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut state = TextState::default();
        let mut font_name: Vec<u8> = Vec::new();
        let mut in_text = false;

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    state.set_matrix(TextMatrix::default());
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands.as_slice() {
                        font_name = name.clone();
                        state.font_size = get_number(size).unwrap_or(state.font_size);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands.as_slice() {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.next_line(tx, ty);
                    }
                }
                "Tm" => {
                    if operands.len() >= 6 {
                        let v: Vec<f32> = operands
                            .iter()
                            .map(|o| get_number(o).unwrap_or(0.0))
                            .collect();
                        state.set_matrix(TextMatrix::new(v[0], v[1], v[2], v[3], v[4], v[5]));
                    }
                }
                "T*" => state.next_line(0.0, -state.leading),
                "Tj" | "TJ" | "'" | "\"" if in_text => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.next_line(0.0, -state.leading);
                    }
                    let encoding = fonts
                        .get(&font_name)
                        .and_then(|f| f.get_font_encoding(&self.doc).ok());
                    let decode = |bytes: &[u8]| match encoding.as_ref() {
                        Some(enc) => LopdfDocument::decode_text(enc, bytes)
                            .unwrap_or_else(|_| decode_text_simple(bytes)),
                        None => decode_text_simple(bytes),
                    };
                    let text = match op.operator.as_str() {
                        "TJ" => match operands.first() {
                            Some(Object::Array(items)) => decode_tj(items, &decode),
                            _ => String::new(),
                        },
                        "\"" => match operands.get(2) {
                            Some(Object::String(bytes, _)) => decode(bytes.as_slice()),
                            _ => String::new(),
                        },
                        _ => match operands.first() {
                            Some(Object::String(bytes, _)) => decode(bytes.as_slice()),
                            _ => String::new(),
                        },
                    };

                    if !text.trim().is_empty() {
                        let span = state.span(text, height);
                        let advance = span.bbox.x1 - span.bbox.x0;
                        spans.push(span);
                        state.matrix.advance(advance);
                    }
                }
                _ => {}
            }
        }

        log::debug!("Page {}: {} raw spans", page, spans.len());
        Ok(spans)
    }

    fn page_text(&self, page: u32) -> Result<String> {
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))
    }
}

/// Decode a TJ array, turning wide negative adjustments into spaces.
fn decode_tj(items: &[Object], decode: &dyn Fn(&[u8]) -> String) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes.as_slice())),
            other => {
                let Some(adjustment) = get_number(other).map(|n| -n) else {
                    continue;
                };
                let wants_space = adjustment > TJ_SPACE_THRESHOLD
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                if wants_space {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Graphics text state tracked while walking a content stream.
///
/// `matrix` advances with every shown string; `line_matrix` only moves on
/// line operators (`Td`, `TD`, `T*`, `'`, `"`) and `Tm`, and each line
/// move restarts `matrix` from it.
#[derive(Debug, Clone, Copy)]
struct TextState {
    matrix: TextMatrix,
    line_matrix: TextMatrix,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            line_matrix: TextMatrix::default(),
            font_size: 12.0,
            leading: 12.0,
        }
    }
}

impl TextState {
    /// Replace both the text and the line matrix.
    fn set_matrix(&mut self, matrix: TextMatrix) {
        self.matrix = matrix;
        self.line_matrix = matrix;
    }

    /// Start a new line offset from the start of the current one.
    fn next_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix.translate(tx, ty);
        self.matrix = self.line_matrix;
    }

    /// Build a span at the current position, flipping y to grow downward.
    fn span(&self, text: String, page_height: f32) -> RawSpan {
        let (x, baseline) = self.matrix.position();
        let size = self.font_size * self.matrix.vertical_scale();
        let width = text.chars().count() as f32 * size * 0.5;
        // Ascender/descender approximated from the font size.
        let top = baseline + size * 0.8;
        let bottom = baseline - size * 0.2;
        RawSpan {
            text,
            font_size: size,
            bbox: BoundingBox::new(x, page_height - top, x + width, page_height - bottom),
        }
    }
}

/// Text matrix for position tracking.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// Move right by an already-scaled distance.
    fn advance(&mut self, dx: f32) {
        self.e += dx;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn vertical_scale(&self) -> f32 {
        let scale = (self.c * self.c + self.d * self.d).sqrt();
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words (Chinese, Japanese).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F // CJK symbols and punctuation
        | 0x3040..=0x30FF // Hiragana, Katakana
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0x20000..=0x2EBEF)
}

/// Decode bytes without a font encoding: UTF-16BE with BOM, then UTF-8,
/// then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
