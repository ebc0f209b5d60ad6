//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::pipeline::{Rejoinder, MIN_SELECTED_COLUMNS};
use crate::reader::ReadResult;
use crate::render::OutputFormat;

/// Response sent after an upload; everything the column-selection form needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub job_id: String,

    /// "ready" or "warning" (duplicate headers)
    pub status: String,

    pub file_name: String,

    /// Header row, in file order
    pub headers: Vec<String>,

    pub duplicate_headers: Vec<String>,

    /// Output format names
    pub templates: Vec<String>,

    pub row_count: usize,

    /// Fewest columns the generate call accepts
    pub min_columns: usize,
}

impl UploadResponse {
    pub fn new(file_name: impl Into<String>, result: &ReadResult) -> Self {
        let duplicate_headers = result.table.duplicate_headers();
        let status = if duplicate_headers.is_empty() { "ready" } else { "warning" };

        Self {
            job_id: new_job_id(),
            status: status.to_string(),
            file_name: file_name.into(),
            headers: result.table.headers.clone(),
            duplicate_headers,
            templates: OutputFormat::available()
                .iter()
                .map(|name| name.to_string())
                .collect(),
            row_count: result.table.row_count(),
            min_columns: MIN_SELECTED_COLUMNS,
        }
    }
}

/// Response sent after a successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub job_id: String,

    /// Always "ready"
    pub status: String,

    /// Rendered document text
    pub content: String,

    /// Suggested download name
    pub file_name: String,

    pub extension: String,

    pub format: OutputFormat,
}

impl GenerateResponse {
    /// Wrap a rejoinder generated from the upload named `source_name`.
    pub fn new(source_name: &str, rejoinder: Rejoinder) -> Self {
        let file_name = rejoinder.file_name(crate::pipeline::file_stem(source_name));
        Self {
            job_id: new_job_id(),
            status: "ready".to_string(),
            content: rejoinder.content,
            file_name,
            extension: rejoinder.extension.to_string(),
            format: rejoinder.format,
        }
    }
}

fn new_job_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": new_job_id(),
        "status": "error",
        "error": error,
    })
}
