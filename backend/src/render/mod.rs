//! Rendering: escaping, document assembly and template execution.
//!
//! ```text
//! TabularData ──escape──▶ TabularData ──assemble──▶ Document ──template──▶ String
//!   (kept)                 (per format)                                  (.tex / .typ)
//! ```
//!
//! - `format`: [`OutputFormat`] selector bundling the per-format policy
//! - `escape`: single-pass markup escapers
//! - `reviewer`: reviewer id extraction and grouping
//! - `document`: template-facing [`Document`] model
//! - `engine`: [`TemplateEngine`] / [`Renderer`]

pub mod document;
pub mod engine;
pub mod escape;
pub mod format;
pub mod reviewer;

pub use document::{Document, Header, Record, Response};
pub use engine::{Renderer, TemplateEngine, TemplateSet, LATEX_TEMPLATE, TYPST_TEMPLATE};
pub use escape::{escape_latex, escape_table, escape_typst};
pub use format::OutputFormat;
pub use reviewer::{extract_reviewer_id, extract_reviewers};
