// Two-column PDF layout for parsed resumes.
// Layout is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod columns;
pub mod document;
pub mod engine;
pub mod font_metrics;

pub use document::LayoutError;
pub use engine::ColumnLayoutEngine;
