//! Positioned text runs and their serialization to PDF.
//!
//! The layout engine fills a [`Document`] with runs measured in millimetres
//! from the page's top-left corner; [`Document::to_pdf`] flips them into PDF
//! user space and writes one Flate-compressed content stream per page.

use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};
use serde::Serialize;
use thiserror::Error;

use crate::layout::columns::Column;
use crate::layout::font_metrics::{FontFace, BULLET_MARKER, MM_PER_PT};

/// WinAnsiEncoding code for the bullet glyph.
const WIN_ANSI_BULLET: u8 = 0x95;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to compress page {page} content: {source}")]
    Compress {
        page: usize,
        #[source]
        source: std::io::Error,
    },
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    /// Left edge, millimetres from the page's left side.
    pub x_mm: f32,
    /// Top of the line box, millimetres from the page top.
    pub y_mm: f32,
    pub line_height_mm: f32,
    pub face: FontFace,
    pub size_pt: f32,
    pub text: String,
    /// Column the run was laid out in; `None` for the full-width header.
    pub column: Option<Column>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<Page>,
}

impl Document {
    /// A document with a single empty page.
    pub fn new(page_width_mm: f32, page_height_mm: f32) -> Self {
        Self {
            page_width_mm,
            page_height_mm,
            pages: vec![Page::default()],
        }
    }

    /// Mutable access to page `index`, appending blank pages as needed.
    pub fn page_mut(&mut self, index: usize) -> &mut Page {
        if self.pages.len() <= index {
            self.pages.resize_with(index + 1, Page::default);
        }
        &mut self.pages[index]
    }

    /// All runs with their page index, in page order.
    #[cfg(test)]
    pub fn runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.runs.iter().map(move |run| (i, run)))
    }

    /// Serializes the document as PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>, LayoutError> {
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let fonts: Vec<(FontFace, Ref)> = [FontFace::Regular, FontFace::Bold]
            .into_iter()
            .map(|face| (face, alloc()))
            .collect();
        let page_ids: Vec<Ref> = self.pages.iter().map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = self.pages.iter().map(|_| alloc()).collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        for (face, font_ref) in &fonts {
            pdf.type1_font(*font_ref)
                .base_font(Name(face.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let width_pt = self.page_width_mm / MM_PER_PT;
        let height_pt = self.page_height_mm / MM_PER_PT;

        for (i, page) in self.pages.iter().enumerate() {
            let content = self.page_content(page, height_pt);
            let compressed = deflate(&content).map_err(|source| LayoutError::Compress {
                page: i + 1,
                source,
            })?;
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);

            let mut pdf_page = pdf.page(page_ids[i]);
            pdf_page
                .media_box(Rect::new(0.0, 0.0, width_pt, height_pt))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = pdf_page.resources();
            let mut font_dict = resources.fonts();
            for (face, font_ref) in &fonts {
                font_dict.pair(Name(face.resource_name().as_bytes()), *font_ref);
            }
        }

        Ok(pdf.finish())
    }

    fn page_content(&self, page: &Page, height_pt: f32) -> Vec<u8> {
        let mut content = Content::new();
        for run in &page.runs {
            let size_mm = run.size_pt * MM_PER_PT;
            // Vertically centre the glyphs in the line box.
            let baseline_mm = run.y_mm + run.line_height_mm / 2.0 + 0.3 * size_mm;
            content
                .begin_text()
                .set_font(Name(run.face.resource_name().as_bytes()), run.size_pt)
                .next_line(run.x_mm / MM_PER_PT, height_pt - baseline_mm / MM_PER_PT)
                .show(Str(&encode_win_ansi(&run.text)))
                .end_text();
        }
        content.finish()
    }
}

/// Encodes text for a WinAnsi Type1 font. ASCII passes through, the bullet
/// marker maps to its WinAnsi code, and everything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            c if c.is_ascii() => c as u8,
            BULLET_MARKER => WIN_ANSI_BULLET,
            _ => b'?',
        })
        .collect()
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn run(text: &str) -> TextRun {
        TextRun {
            x_mm: 10.0,
            y_mm: 10.0,
            line_height_mm: 5.0,
            face: FontFace::Regular,
            size_pt: 9.0,
            text: text.to_string(),
            column: None,
        }
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Rust"), b"Rust".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} x"), vec![0x95, b' ', b'x']);
        assert_eq!(encode_win_ansi("\u{e9}"), b"?".to_vec());
    }

    #[test]
    fn test_page_mut_appends_pages() {
        let mut doc = Document::new(210.0, 297.0);
        doc.page_mut(2).runs.push(run("third"));
        assert_eq!(doc.pages.len(), 3);
        assert!(doc.pages[1].runs.is_empty());
        assert_eq!(doc.runs().next().map(|(i, _)| i), Some(2));
    }

    #[test]
    fn test_to_pdf_produces_pdf_bytes() {
        let mut doc = Document::new(210.0, 297.0);
        doc.page_mut(0).runs.push(run("Jane Doe"));
        let bytes = doc.to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
        assert!(contains(&bytes, b"WinAnsiEncoding"));
        assert!(contains(&bytes, b"FlateDecode"));
    }

    #[test]
    fn test_to_pdf_is_deterministic() {
        let mut doc = Document::new(210.0, 297.0);
        doc.page_mut(1).runs.push(run("second page"));
        assert_eq!(doc.to_pdf().unwrap(), doc.to_pdf().unwrap());
    }
}
