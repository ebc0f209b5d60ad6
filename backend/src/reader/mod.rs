//! Input readers: CSV and spreadsheet files into [`TabularData`].
//!
//! The first row of the file becomes the header row; every later row a
//! record. Cells are kept as text, untrimmed and uncoerced.
//!
//! # Supported inputs
//!
//! | Extension                         | Reader                                   |
//! |-----------------------------------|------------------------------------------|
//! | `.csv`                            | auto-detected encoding and delimiter     |
//! | `.xlsx`, `.xlsm`, `.xls`, `.ods`  | first worksheet                          |

pub mod delimited;
pub mod spreadsheet;

use serde::Serialize;
use std::path::Path;

use crate::error::{ReaderError, ReaderResult};
use crate::table::TabularData;

pub use self::delimited::{decode_content, detect_delimiter, detect_encoding, parse_csv};
pub use self::spreadsheet::parse_spreadsheet;

/// Kind of input, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Excel,
}

impl SourceKind {
    /// Detect the kind from a file name, case-insensitively.
    pub fn from_file_name(file_name: &str) -> ReaderResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(SourceKind::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(SourceKind::Excel),
            _ => Err(ReaderError::UnsupportedFileType(file_name.to_string())),
        }
    }
}

/// A table plus what was detected while reading it.
#[derive(Debug, Clone)]
pub struct ReadResult {
    pub table: TabularData,
    pub kind: SourceKind,
    /// Detected encoding (CSV only)
    pub encoding: Option<String>,
    /// Detected delimiter (CSV only)
    pub delimiter: Option<char>,
}

/// Read an uploaded file's bytes, using `file_name` to pick the reader.
pub fn read_bytes(bytes: &[u8], file_name: &str) -> ReaderResult<ReadResult> {
    let kind = SourceKind::from_file_name(file_name)?;

    match kind {
        SourceKind::Csv => {
            let encoding = detect_encoding(bytes);
            let content = decode_content(bytes, &encoding)?;
            let delimiter = detect_delimiter(&content);
            let table = parse_csv(&content, delimiter)?;
            Ok(ReadResult {
                table,
                kind,
                encoding: Some(encoding),
                delimiter: Some(delimiter),
            })
        }
        SourceKind::Excel => Ok(ReadResult {
            table: parse_spreadsheet(bytes)?,
            kind,
            encoding: None,
            delimiter: None,
        }),
    }
}

/// Read a file from disk.
///
/// # Example
/// ```ignore
/// let result = rejoinder::reader::read_file("reviews.csv")?;
/// println!("{} columns, {} rows", result.table.column_count(), result.table.row_count());
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> ReaderResult<ReadResult> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    // Reject unsupported files before touching the disk
    SourceKind::from_file_name(&file_name)?;

    let bytes = std::fs::read(path)?;
    read_bytes(&bytes, &file_name)
}
