//! PDF backend for the renderer adapter, built on `pdf-writer`.
//!
//! One `PdfRenderer` per document. Pages accumulate as raw content streams
//! while the layout run drives the adapter; `finish` assembles the catalog,
//! page tree, and the two base-14 Type1 fonts (Helvetica for bodies,
//! Helvetica-Bold for titles and headers) and returns the document bytes.
//!
//! Coordinate model: the adapter speaks top-down millimeters from the page's
//! top-left corner; PDF content streams are bottom-up points, so every draw
//! converts and drops the first baseline by the font ascent.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::layout::config::{LayoutConfig, MM_PER_PT};
use crate::render::adapter::{PageRenderer, RenderError, TextStyle};
use crate::render::font_metrics::{glyph_widths, FontFace, GlyphWidths};

/// Resource names the content streams reference.
const FONT_REGULAR: Name = Name(b"F1");
const FONT_BOLD: Name = Name(b"F2");

/// Approximate cap-height ascent fraction used to place the first baseline.
const ASCENT: f32 = 0.8;

/// Point size of the running page header.
const HEADER_FONT_SIZE: f32 = 10.0;

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Maps text to WinAnsi bytes; Latin-1 passes through, anything else
/// degrades to '?'. Formula substitution stays off the document path for
/// this reason; only exotic input in names or definitions is affected.
fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// `PageRenderer` implementation producing a real PDF document.
pub struct PdfRenderer {
    page_width_pt: f32,
    page_height_pt: f32,
    margin_mm: f32,
    page_width_mm: f32,
    line_height: f32,
    doc_title: String,
    pages: Vec<Content>,
}

impl PdfRenderer {
    /// A renderer with its first page already open, titled `doc_title` in
    /// the running header.
    pub fn new(config: &LayoutConfig, doc_title: &str) -> Self {
        PdfRenderer {
            page_width_pt: mm_to_pt(config.page_width),
            page_height_pt: mm_to_pt(config.page_height),
            margin_mm: config.margin,
            page_width_mm: config.page_width,
            line_height: config.line_height,
            doc_title: doc_title.to_string(),
            pages: vec![Content::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn face_for(style: TextStyle) -> (&'static GlyphWidths, Name<'static>) {
        match style {
            TextStyle::Title => (glyph_widths(FontFace::HelveticaBold), FONT_BOLD),
            TextStyle::Body => (glyph_widths(FontFace::Helvetica), FONT_REGULAR),
        }
    }

    fn current_page(&mut self) -> &mut Content {
        // `pages` is never empty: one page is opened at construction.
        self.pages
            .last_mut()
            .expect("renderer always holds an open page")
    }

    fn draw_lines(
        &mut self,
        lines: &[String],
        x_mm: f32,
        y_mm: f32,
        font_size: f32,
        font: Name,
    ) {
        if lines.is_empty() {
            return;
        }
        let x_pt = mm_to_pt(x_mm);
        let first_baseline = self.page_height_pt - mm_to_pt(y_mm) - font_size * ASCENT;
        let leading = mm_to_pt(font_size * MM_PER_PT * self.line_height);

        let content = self.current_page();
        content.begin_text();
        content.set_font(font, font_size);
        content.next_line(x_pt, first_baseline);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                content.next_line(0.0, -leading);
            }
            content.show(Str(&to_winansi_bytes(line)));
        }
        content.end_text();
    }

    /// Assembles and returns the document bytes. Consumes the renderer: a
    /// finished document accepts no further draw calls.
    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        let page_count = self.pages.len();
        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let page_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_count as i32);

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for (i, content) in self.pages.into_iter().enumerate() {
            pdf.stream(content_ids[i], &content.finish());
        }

        for i in 0..page_count {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width_pt, self.page_height_pt))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, regular_id);
            fonts.pair(FONT_BOLD, bold_id);
        }

        Ok(pdf.finish())
    }
}

impl PageRenderer for PdfRenderer {
    fn wrap_text(
        &mut self,
        text: &str,
        font_size: f32,
        available_width: f32,
    ) -> Result<Vec<String>, RenderError> {
        if available_width <= 0.0 {
            return Err(RenderError::Wrap(format!(
                "non-positive wrap width {available_width}mm"
            )));
        }
        // Regular metrics wrap both styles; bold runs measure a hair wider
        // and are absorbed by the column gutter.
        let metrics = glyph_widths(FontFace::Helvetica);
        Ok(metrics.wrap_to_width(text, font_size, available_width))
    }

    fn draw_text(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        font_size: f32,
        style: TextStyle,
    ) -> Result<(), RenderError> {
        let (_, font) = Self::face_for(style);
        self.draw_lines(lines, x, y, font_size, font);
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), RenderError> {
        self.pages.push(Content::new());
        Ok(())
    }

    fn set_page_header(&mut self, page_index: usize) -> Result<(), RenderError> {
        let title = self.doc_title.clone();
        let label = format!("Page {}", page_index + 1);
        let metrics = glyph_widths(FontFace::Helvetica);
        let label_x = self.page_width_mm - self.margin_mm - metrics.measure_mm(&label, HEADER_FONT_SIZE);

        self.draw_lines(
            std::slice::from_ref(&title),
            self.margin_mm,
            self.margin_mm,
            HEADER_FONT_SIZE,
            FONT_BOLD,
        );
        self.draw_lines(
            std::slice::from_ref(&label),
            label_x,
            self.margin_mm,
            HEADER_FONT_SIZE,
            FONT_REGULAR,
        );
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
