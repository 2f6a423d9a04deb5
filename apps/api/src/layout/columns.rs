//! Page geometry and the fixed section → column assignment.
//!
//! All distances are millimetres measured from the top-left corner of an A4
//! page, matching the way the engine tracks its cursors.

use serde::{Deserialize, Serialize};

/// Sections rendered in the left column, in render order.
pub const LEFT_SECTIONS: &[&str] = &[
    "EDUCATION",
    "SKILLS",
    "TECHNICAL SKILLS",
    "COURSEWORK",
    "ACHIEVEMENTS",
    "LINKS",
];

/// Sections rendered in the right column, in render order.
pub const RIGHT_SECTIONS: &[&str] = &[
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "PROJECTS",
    "PROFESSIONAL EXPERIENCE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Left,
    Right,
}

impl Column {
    /// Section names this column renders, in order.
    pub fn sections(self) -> &'static [&'static str] {
        match self {
            Column::Left => LEFT_SECTIONS,
            Column::Right => RIGHT_SECTIONS,
        }
    }
}

/// Which column a section belongs to, if any. Case-insensitive.
pub fn column_for(section: &str) -> Option<Column> {
    let section = section.trim().to_uppercase();
    [Column::Left, Column::Right]
        .into_iter()
        .find(|column| column.sections().contains(&section.as_str()))
}

/// Horizontal extent of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub x_mm: f32,
    pub width_mm: f32,
}

impl ColumnSpec {
    pub fn right_edge_mm(&self) -> f32 {
        self.x_mm + self.width_mm
    }
}

/// Fixed page geometry for the two-column resume.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    /// A line whose bottom would cross this y starts a new page.
    pub page_break_y_mm: f32,
    pub left: ColumnSpec,
    pub right: ColumnSpec,
    /// Where the right column starts on the first page, independent of the
    /// left column's progress.
    pub right_column_top_mm: f32,
}

impl PageGeometry {
    pub fn column(&self, column: Column) -> ColumnSpec {
        match column {
            Column::Left => self.left,
            Column::Right => self.right,
        }
    }

    /// Width available to the full-width header block, inside both margins.
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }
}

impl Default for PageGeometry {
    /// A4, 10 mm margins, 65 mm left column, 10 mm gutter, 125 mm right
    /// column. The right column reaches the paper edge (no right margin).
    fn default() -> Self {
        let margin = 10.0;
        let left_width = 65.0;
        let gutter = 10.0;
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: margin,
            page_break_y_mm: 297.0 - 20.0,
            left: ColumnSpec {
                x_mm: margin,
                width_mm: left_width,
            },
            right: ColumnSpec {
                x_mm: margin + left_width + gutter,
                width_mm: 125.0,
            },
            right_column_top_mm: margin + 25.0,
        }
    }
}
