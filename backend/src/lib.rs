//! # Rejoinder - response-to-reviewers documents from review spreadsheets
//!
//! Rejoinder reads a CSV or spreadsheet of reviewer comments (one row per
//! comment, first column the comment id such as `R1.2`), keeps the columns
//! the author selects, and renders a LaTeX or Typst document grouping the
//! responses by reviewer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV / XLSX │────▶│   Reader    │────▶│    Keep     │────▶│   Render    │
//! │  (any enc.) │     │ (auto-det.) │     │ (selection) │     │ (.tex/.typ) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rejoinder::pipeline::{generate, GenerateOptions};
//! use rejoinder::{reader, OutputFormat, TemplateEngine};
//!
//! let table = reader::read_file("reviews.csv")?.table;
//! let engine = TemplateEngine::embedded()?;
//! let options = GenerateOptions::new(vec!["ID".into(), "Comment".into(), "Response".into()])
//!     .with_format(OutputFormat::Typst);
//! let rejoinder = generate(&table, &options, &engine)?;
//! std::fs::write(rejoinder.file_name("reviews"), rejoinder.content)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Environment-driven configuration
//! - [`table`] - In-memory table and column projection
//! - [`reader`] - CSV / spreadsheet input
//! - [`render`] - Escaping, reviewer grouping and templates
//! - [`pipeline`] - Selection rules and generation
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod table;

// Input
pub mod reader;

// Output
pub mod pipeline;
pub mod render;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    PipelineError, PipelineResult, ReaderError, ReaderResult, RenderError, RenderResult,
    ServerError, ServerResult,
};

// =============================================================================
// Re-exports - Core
// =============================================================================

pub use config::AppConfig;
pub use table::TabularData;

pub use reader::{read_bytes, read_file, ReadResult, SourceKind};

pub use render::{
    escape_latex, escape_typst, extract_reviewer_id, extract_reviewers, Document, OutputFormat,
    Renderer, TemplateEngine, TemplateSet,
};

pub use pipeline::{check_selection, generate, GenerateOptions, Rejoinder, MIN_SELECTED_COLUMNS};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, GenerateResponse, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
