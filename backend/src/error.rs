//! Error types for the rejoinder pipeline.
//!
//! One error type per layer:
//!
//! - [`ReaderError`] - Reading CSV / spreadsheet input into a table
//! - [`RenderError`] - Template compilation and execution
//! - [`PipelineError`] - Generation orchestration (selection rules + the above)
//! - [`ServerError`] - HTTP layer
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Reader Errors
// =============================================================================

/// Errors while turning an input file into a [`crate::TabularData`].
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file extension is not one we can read.
    #[error("Unsupported file type: '{0}' (expected .csv, .xlsx, .xlsm, .xls or .ods)")]
    UnsupportedFileType(String),

    /// Failed to decode the byte content.
    #[error("Failed to decode content as {encoding}: {message}")]
    EncodingError { encoding: String, message: String },

    /// Invalid CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    CsvError { line: u64, message: String },

    /// The spreadsheet could not be opened or has no worksheet.
    #[error("Invalid spreadsheet: {0}")]
    SpreadsheetError(String),

    /// No header row.
    #[error("File is empty")]
    EmptyFile,
}

impl From<csv::Error> for ReaderError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ReaderError::CsvError {
            line,
            message: err.to_string(),
        }
    }
}

impl From<calamine::Error> for ReaderError {
    fn from(err: calamine::Error) -> Self {
        ReaderError::SpreadsheetError(err.to_string())
    }
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors from the template engine.
///
/// These are always recoverable: a broken template never aborts the process.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template failed to compile or to execute.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Template override directory could not be read.
    #[error("Cannot read template '{path}': {source}")]
    TemplateIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors from [`crate::pipeline::generate`] and the selection checks around it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input reading error.
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Fewer columns selected than a rejoinder needs.
    #[error("Please select at least {required} columns ({selected} selected)")]
    UnderSelection { required: usize, selected: usize },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ReaderError> for ServerError {
    fn from(err: ReaderError) -> Self {
        ServerError::Pipeline(err.into())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
