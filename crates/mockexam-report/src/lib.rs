//! mockexam-report — review-side output for finished attempts.
//!
//! Projects a scored attempt into per-question review rows and renders
//! them as markdown, JSON, or a self-contained HTML page.

pub mod html;
pub mod review;

pub use html::generate_html;
pub use review::{ReviewReport, ReviewRow, ReviewVerdict};
