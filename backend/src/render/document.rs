//! Template-facing document model.
//!
//! [`Document::assemble`] turns an (already escaped) table into the structure
//! the templates iterate over:
//!
//! ```text
//! headers: ID | Comment | Response         Document
//! ┌──────────┬─────────┬──────────┐        ├─ reviewer_ids: [R1, R2]
//! │ R1.1     │ Typo    │ Fixed    │   →    ├─ headers:      [(ID,1) (Comment,2) (Response,3)]
//! │ R2.1     │ Unclear │ Reworded │        └─ responses:    [R1.1 → 3 records, R2.1 → 3 records]
//! └──────────┴─────────┴──────────┘
//! ```
//!
//! Typst documents leave column 0 out of `headers` and of every response's
//! `records`; the id is still available as `Response::id`.

use serde::Serialize;

use super::format::OutputFormat;
use super::reviewer::{extract_reviewer_id, extract_reviewers};
use crate::table::TabularData;

/// A column as seen by the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    /// 1-based position in the template-visible header list.
    pub position: usize,
}

/// One cell of a response, labelled with its column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub header: String,
    pub text: String,
}

/// One source row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Full identity cell (column 0), e.g. `R2.3`.
    pub id: String,
    /// Short reviewer id derived from `id`, e.g. `R2`.
    pub reviewer_id: String,
    /// 1-based index of `reviewer_id` in [`Document::reviewer_ids`].
    pub reviewer_index: Option<usize>,
    pub records: Vec<Record>,
}

/// Everything a rejoinder template needs. Built per render, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub reviewer_ids: Vec<String>,
    /// Number of template-visible headers.
    pub column_count: usize,
    pub headers: Vec<Header>,
    pub responses: Vec<Response>,
}

impl Document {
    /// Build the document for `format` from escaped table data.
    ///
    /// Response count always equals row count: an empty row becomes a
    /// placeholder with an empty id and no records.
    pub fn assemble(table: &TabularData, format: OutputFormat) -> Document {
        let first_column = if format.includes_identity_column() { 0 } else { 1 };

        let reviewer_ids = extract_reviewers(&table.records);
        let headers = visible_headers(&table.headers, first_column);
        let responses = table
            .records
            .iter()
            .map(|row| as_response(&table.headers, row, first_column, &reviewer_ids))
            .collect();

        Document {
            reviewer_ids,
            column_count: headers.len(),
            headers,
            responses,
        }
    }
}

fn visible_headers(headers: &[String], first_column: usize) -> Vec<Header> {
    headers
        .iter()
        .skip(first_column)
        .enumerate()
        .map(|(idx, name)| Header {
            name: name.clone(),
            position: idx + 1,
        })
        .collect()
}

fn as_response(
    headers: &[String],
    row: &[String],
    first_column: usize,
    reviewer_ids: &[String],
) -> Response {
    let Some(id) = row.first() else {
        return Response::default();
    };

    let reviewer_id = extract_reviewer_id(id);
    let reviewer_index = reviewer_ids
        .iter()
        .position(|r| r == reviewer_id)
        .map(|i| i + 1);

    let records = headers
        .iter()
        .enumerate()
        .skip(first_column)
        .map(|(i, header)| Record {
            header: header.clone(),
            text: row.get(i).cloned().unwrap_or_default(),
        })
        .collect();

    Response {
        id: id.clone(),
        reviewer_id: reviewer_id.to_string(),
        reviewer_index,
        records,
    }
}
