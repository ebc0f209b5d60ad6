//! Spreadsheet reader (.xlsx, .xlsm, .xls, .ods) backed by calamine.
//!
//! Only the first worksheet is read. Every cell is rendered to text.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use crate::error::{ReaderError, ReaderResult};
use crate::table::TabularData;

/// Parse the first worksheet of a workbook held in memory.
pub fn parse_spreadsheet(bytes: &[u8]) -> ReaderResult<TabularData> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReaderError::SpreadsheetError("workbook has no worksheet".to_string()))??;

    let mut rows = range.rows().map(row_to_strings);
    let headers = rows.next().ok_or(ReaderError::EmptyFile)?;

    Ok(TabularData::new(headers, rows.collect()))
}

/// Render a row to text, dropping trailing empty cells.
///
/// Sheets are stored as rectangles; short rows are the norm for review sheets
/// where the later columns are still blank.
fn row_to_strings(row: &[Data]) -> Vec<String> {
    let mut cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_strings_trims_trailing_empty() {
        let row = vec![
            Data::String("R1.1".to_string()),
            Data::String("Comment".to_string()),
            Data::Empty,
            Data::Empty,
        ];
        assert_eq!(row_to_strings(&row), vec!["R1.1", "Comment"]);
    }

    #[test]
    fn test_row_to_strings_keeps_inner_empty() {
        let row = vec![
            Data::String("R1.1".to_string()),
            Data::Empty,
            Data::String("x".to_string()),
        ];
        assert_eq!(row_to_strings(&row), vec!["R1.1", "", "x"]);
    }

    #[test]
    fn test_row_to_strings_numbers_as_text() {
        let row = vec![Data::Int(3), Data::Bool(true)];
        assert_eq!(row_to_strings(&row), vec!["3", "true"]);
    }

    #[test]
    fn test_row_to_strings_all_empty() {
        let row = vec![Data::Empty, Data::Empty];
        assert!(row_to_strings(&row).is_empty());
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = parse_spreadsheet(b"definitely not a workbook");
        assert!(matches!(result, Err(ReaderError::SpreadsheetError(_))));
    }
}
