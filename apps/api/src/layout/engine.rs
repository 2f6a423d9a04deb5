//! Two-column resume layout.
//!
//! Single pass, fixed order:
//! 1. full-width header (name, `email | phone`)
//! 2. left column sections in [`LEFT_SECTIONS`](crate::layout::columns::LEFT_SECTIONS) order
//! 3. right column cursor reset to a fixed offset below the header
//! 4. right column sections in [`RIGHT_SECTIONS`](crate::layout::columns::RIGHT_SECTIONS) order
//!
//! Each column has its own [`ColumnCursor`]; cursors only move forward, so
//! lines within a column never overlap. Sections not assigned to a column are
//! skipped.

use tracing::debug;

use crate::layout::columns::{column_for, Column, ColumnSpec, PageGeometry};
use crate::layout::document::{Document, LayoutError, TextRun};
use crate::layout::font_metrics::{get_metrics, FontFace, BULLET_MARKER};
use crate::resume::{ContactBlock, ResumeSections};

/// Leading characters that mark a content line as a bullet item. `*` and `-`
/// only count when followed by whitespace, so `-15% churn` stays plain text.
pub const BULLET_GLYPHS: &[char] = &['\u{2022}', '*', '-'];

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

/// Font sizes (pt), line heights and gaps (mm) for each kind of line.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub name_size_pt: f32,
    pub name_line_mm: f32,
    pub details_size_pt: f32,
    pub details_line_mm: f32,
    pub header_gap_mm: f32,
    pub title_size_pt: f32,
    pub title_line_mm: f32,
    pub title_gap_mm: f32,
    pub body_size_pt: f32,
    pub body_line_mm: f32,
    pub section_gap_mm: f32,
    /// Horizontal offset of bullet text from the column edge.
    pub bullet_indent_mm: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            name_size_pt: 16.0,
            name_line_mm: 10.0,
            details_size_pt: 10.0,
            details_line_mm: 5.0,
            header_gap_mm: 5.0,
            title_size_pt: 11.0,
            title_line_mm: 6.0,
            title_gap_mm: 2.0,
            body_size_pt: 9.0,
            body_line_mm: 5.0,
            section_gap_mm: 5.0,
            bullet_indent_mm: 3.5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Vertical write position of one column: page index plus distance from the
/// page top. Ordered by page first, so advancing across a page break still
/// moves the cursor forward.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ColumnCursor {
    pub page: usize,
    pub y_mm: f32,
}

impl ColumnCursor {
    pub fn new(y_mm: f32) -> Self {
        Self { page: 0, y_mm }
    }
}

/// A content line after bullet detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLine<'a> {
    Plain(&'a str),
    /// Bullet text with its leading glyph stripped.
    Bullet(&'a str),
}

impl<'a> ContentLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix(BULLET_GLYPHS) else {
            return ContentLine::Plain(trimmed);
        };
        if trimmed.starts_with(BULLET_MARKER) || rest.starts_with(char::is_whitespace) {
            ContentLine::Bullet(rest.trim_start())
        } else {
            ContentLine::Plain(trimmed)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ColumnLayoutEngine {
    pub geometry: PageGeometry,
    pub typography: Typography,
}

/// Output of a layout pass, before serialization.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub document: Document,
    pub left_cursor: ColumnCursor,
    pub right_cursor: ColumnCursor,
    /// Sections that were rendered, in render order.
    pub rendered_sections: Vec<(Column, String)>,
}

impl ColumnLayoutEngine {
    /// Lays out the resume and serializes it as PDF bytes.
    pub fn render(
        &self,
        sections: &ResumeSections,
        contact: &ContactBlock,
    ) -> Result<Vec<u8>, LayoutError> {
        let layout = self.layout(sections, contact);
        debug!(
            pages = layout.document.pages.len(),
            sections = layout.rendered_sections.len(),
            left_end_page = layout.left_cursor.page + 1,
            right_end_page = layout.right_cursor.page + 1,
            "Resume layout complete"
        );
        layout.document.to_pdf()
    }

    /// Runs the layout pass without serializing.
    pub fn layout(&self, sections: &ResumeSections, contact: &ContactBlock) -> LayoutResult {
        let mut document = Document::new(self.geometry.page_width_mm, self.geometry.page_height_mm);
        let mut rendered_sections = Vec::new();

        let header_bottom = self.render_header(&mut document, &contact.sanitized());

        let mut left_cursor = ColumnCursor::new(header_bottom);
        self.render_column(
            &mut document,
            Column::Left,
            sections,
            &mut left_cursor,
            &mut rendered_sections,
        );

        // The right column ignores how far the left column got; it only moves
        // down when a wrapped header runs past its usual start.
        let mut right_cursor =
            ColumnCursor::new(self.geometry.right_column_top_mm.max(header_bottom));
        self.render_column(
            &mut document,
            Column::Right,
            sections,
            &mut right_cursor,
            &mut rendered_sections,
        );

        for name in sections.names() {
            if column_for(name).is_none() {
                debug!(section = name, "Section has no column assignment, skipped");
            }
        }

        LayoutResult {
            document,
            left_cursor,
            right_cursor,
            rendered_sections,
        }
    }

    /// Writes the name and contact line across the full width, wrapping
    /// either one that is wider than the space between the margins. Returns
    /// the y just below the block.
    fn render_header(&self, document: &mut Document, contact: &ContactBlock) -> f32 {
        let t = &self.typography;
        let x = self.geometry.margin_mm;
        let width = self.geometry.content_width_mm();
        let page = document.page_mut(0);

        let details = contact.details_line();
        let lines = [
            (contact.name.as_str(), FontFace::Bold, t.name_size_pt, t.name_line_mm),
            (details.as_str(), FontFace::Regular, t.details_size_pt, t.details_line_mm),
        ];

        let mut y = self.geometry.margin_mm;
        for (text, face, size_pt, line_height_mm) in lines {
            let wrapped = get_metrics(face).wrap(text, size_pt, width);
            let line_count = wrapped.len().max(1);
            for (i, segment) in wrapped.into_iter().enumerate() {
                page.runs.push(TextRun {
                    x_mm: x,
                    y_mm: y + i as f32 * line_height_mm,
                    line_height_mm,
                    face,
                    size_pt,
                    text: segment,
                    column: None,
                });
            }
            y += line_count as f32 * line_height_mm;
        }

        y + t.header_gap_mm
    }

    fn render_column(
        &self,
        document: &mut Document,
        column: Column,
        sections: &ResumeSections,
        cursor: &mut ColumnCursor,
        rendered: &mut Vec<(Column, String)>,
    ) {
        let region = self.geometry.column(column);
        let t = &self.typography;

        for &name in column.sections() {
            let Some(lines) = sections.get(name) else {
                continue;
            };

            self.place_line(
                document,
                cursor,
                column,
                region.x_mm,
                t.title_line_mm,
                FontFace::Bold,
                t.title_size_pt,
                name.to_string(),
            );
            cursor.y_mm += t.title_gap_mm;

            for line in lines {
                self.render_content_line(document, cursor, column, region, ContentLine::classify(line));
            }

            cursor.y_mm += t.section_gap_mm;
            rendered.push((column, name.to_string()));
        }
    }

    fn render_content_line(
        &self,
        document: &mut Document,
        cursor: &mut ColumnCursor,
        column: Column,
        region: ColumnSpec,
        line: ContentLine<'_>,
    ) {
        let t = &self.typography;
        let metrics = get_metrics(FontFace::Regular);

        let (text, text_x) = match line {
            ContentLine::Plain(text) => (text, region.x_mm),
            ContentLine::Bullet(text) => (text, region.x_mm + t.bullet_indent_mm),
        };
        let width = region.right_edge_mm() - text_x;
        let wrapped = metrics.wrap(text, t.body_size_pt, width);

        for (i, segment) in wrapped.into_iter().enumerate() {
            if i == 0 {
                if let ContentLine::Bullet(_) = line {
                    self.ensure_room(cursor, t.body_line_mm);
                    document.page_mut(cursor.page).runs.push(TextRun {
                        x_mm: region.x_mm,
                        y_mm: cursor.y_mm,
                        line_height_mm: t.body_line_mm,
                        face: FontFace::Regular,
                        size_pt: t.body_size_pt,
                        text: BULLET_MARKER.to_string(),
                        column: Some(column),
                    });
                }
            }
            self.place_line(
                document,
                cursor,
                column,
                text_x,
                t.body_line_mm,
                FontFace::Regular,
                t.body_size_pt,
                segment,
            );
        }
    }

    /// Places one line at the cursor and advances it by the line height.
    #[allow(clippy::too_many_arguments)]
    fn place_line(
        &self,
        document: &mut Document,
        cursor: &mut ColumnCursor,
        column: Column,
        x_mm: f32,
        line_height_mm: f32,
        face: FontFace,
        size_pt: f32,
        text: String,
    ) {
        self.ensure_room(cursor, line_height_mm);
        document.page_mut(cursor.page).runs.push(TextRun {
            x_mm,
            y_mm: cursor.y_mm,
            line_height_mm,
            face,
            size_pt,
            text,
            column: Some(column),
        });
        cursor.y_mm += line_height_mm;
    }

    /// Moves the cursor to the top of the next page if a line of `height`
    /// would cross the page-break line.
    fn ensure_room(&self, cursor: &mut ColumnCursor, height: f32) {
        if cursor.y_mm + height > self.geometry.page_break_y_mm {
            cursor.page += 1;
            cursor.y_mm = self.geometry.margin_mm;
        }
    }
}
