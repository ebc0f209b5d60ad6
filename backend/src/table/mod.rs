//! In-memory sheet: a header row plus ragged rows of opaque text.
//!
//! The reader builds one [`TabularData`] per input file. [`TabularData::keep`]
//! projects it onto the selected columns; from then on it is read-only.
//!
//! # Example
//!
//! ```
//! use rejoinder::TabularData;
//!
//! let table = TabularData::new(
//!     vec!["ID".into(), "Comment".into(), "Response".into(), "Action".into()],
//!     vec![vec!["R1.1".into(), "Typo".into(), "Fixed".into()]],
//! );
//!
//! let kept = table.keep(&["ID", "Action"]);
//! assert_eq!(kept.headers, vec!["ID", "Action"]);
//! assert_eq!(kept.records, vec![vec!["R1.1".to_string(), String::new()]]);
//! ```

use serde::{Deserialize, Serialize};

/// A rectangular-ish sheet of text.
///
/// Rows may be shorter (or longer) than `headers`; nothing in this crate
/// rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularData {
    /// Column names in source order. Not guaranteed unique.
    pub headers: Vec<String>,
    /// Data rows in source order.
    pub records: Vec<Vec<String>>,
}

impl TabularData {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when there is at least one row beyond the header row.
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    /// Project onto `columns`, in the order given.
    ///
    /// - a name matches the first header with that name; later duplicates are unreachable
    /// - names not present in the headers are dropped
    /// - cells missing from short rows become `""`
    /// - the row count never changes, even for an empty selection
    pub fn keep<S: AsRef<str>>(&self, columns: &[S]) -> TabularData {
        let indices: Vec<usize> = columns
            .iter()
            .filter_map(|name| self.position_of(name.as_ref()))
            .collect();

        let headers = indices.iter().map(|&i| self.headers[i].clone()).collect();

        let records = self
            .records
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        TabularData { headers, records }
    }

    /// Reorder a column selection to follow the source header order.
    ///
    /// `keep` honours the caller's order; collaborators that want the file's
    /// order call this first. Each header appears at most once and names not
    /// in the source are dropped.
    pub fn order_by_source<S: AsRef<str>>(&self, selection: &[S]) -> Vec<String> {
        let mut ordered: Vec<String> = Vec::new();
        for header in &self.headers {
            if ordered.contains(header) {
                continue;
            }
            if selection.iter().any(|s| s.as_ref() == header) {
                ordered.push(header.clone());
            }
        }
        ordered
    }

    /// Header names that occur more than once, in order of their second occurrence.
    ///
    /// Only the first column of such a name is reachable through [`keep`](Self::keep).
    pub fn duplicate_headers(&self) -> Vec<String> {
        let mut duplicates: Vec<String> = Vec::new();
        for (i, header) in self.headers.iter().enumerate() {
            if self.headers[..i].contains(header) && !duplicates.contains(header) {
                duplicates.push(header.clone());
            }
        }
        duplicates
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> TabularData {
        TabularData::new(
            strings(&["ID", "Comment", "Response", "Action"]),
            vec![
                strings(&["R1.1", "Comment A", "Response A", "Action A"]),
                strings(&["R1.2", "Comment B", "Response B", "Action B"]),
            ],
        )
    }

    #[test]
    fn test_keep_all_headers() {
        let table = sample();
        let kept = table.keep(&["ID", "Comment", "Response", "Action"]);
        assert_eq!(kept, table);
    }

    #[test]
    fn test_keep_subset() {
        let kept = sample().keep(&["ID", "Action"]);
        assert_eq!(kept.headers, strings(&["ID", "Action"]));
        assert_eq!(
            kept.records,
            vec![strings(&["R1.1", "Action A"]), strings(&["R1.2", "Action B"])]
        );
    }

    #[test]
    fn test_keep_follows_requested_order() {
        let kept = sample().keep(&["Response", "ID"]);
        assert_eq!(kept.headers, strings(&["Response", "ID"]));
        assert_eq!(kept.records[0], strings(&["Response A", "R1.1"]));
    }

    #[test]
    fn test_keep_unknown_headers_are_dropped() {
        let kept = sample().keep(&["Address", "Phone"]);
        assert!(kept.headers.is_empty());
        assert_eq!(kept.records, vec![Vec::<String>::new(), Vec::new()]);
    }

    #[test]
    fn test_keep_mixed_known_and_unknown() {
        let kept = sample().keep(&["Phone", "Comment"]);
        assert_eq!(kept.headers, strings(&["Comment"]));
        assert_eq!(kept.records[1], strings(&["Comment B"]));
    }

    #[test]
    fn test_keep_empty_records() {
        let table = TabularData::new(strings(&["ID", "Comment", "Response"]), vec![]);
        let kept = table.keep(&["Comment"]);
        assert_eq!(kept.headers, strings(&["Comment"]));
        assert!(kept.records.is_empty());
    }

    #[test]
    fn test_keep_empty_selection_keeps_rows() {
        let empty: [&str; 0] = [];
        let kept = sample().keep(&empty);
        assert!(kept.headers.is_empty());
        assert_eq!(kept.row_count(), 2);
        assert!(kept.records.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_keep_pads_short_rows() {
        let table = TabularData::new(
            strings(&["ID", "Comment", "Response"]),
            vec![strings(&["R1.1"]), vec![], strings(&["R2.1", "C", "R", "extra"])],
        );
        let kept = table.keep(&["ID", "Response"]);
        assert_eq!(
            kept.records,
            vec![
                strings(&["R1.1", ""]),
                strings(&["", ""]),
                strings(&["R2.1", "R"]),
            ]
        );
        assert!(kept.records.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_keep_first_duplicate_wins() {
        let table = TabularData::new(
            strings(&["ID", "Note", "Note"]),
            vec![strings(&["R1", "first", "second"])],
        );
        let kept = table.keep(&["Note"]);
        assert_eq!(kept.records[0], strings(&["first"]));

        // Asking twice reaches the same column twice, never the shadowed one.
        let twice = table.keep(&["Note", "Note"]);
        assert_eq!(twice.records[0], strings(&["first", "first"]));
    }

    #[test]
    fn test_keep_is_idempotent() {
        let table = TabularData::new(
            strings(&["ID", "Comment", "Response", "Comment"]),
            vec![strings(&["R1.1", "a"]), vec![], strings(&["R2", "b", "c", "d"])],
        );
        let selections: Vec<Vec<&str>> = vec![
            vec![],
            vec!["ID"],
            vec!["Response", "ID"],
            vec!["Comment", "Missing", "Response"],
            vec!["ID", "Comment", "Response"],
        ];
        for selection in selections {
            let once = table.keep(&selection);
            let twice = once.keep(&selection);
            assert_eq!(once, twice, "selection {:?}", selection);
            assert_eq!(once.row_count(), table.row_count());
        }
    }

    #[test]
    fn test_keep_does_not_touch_source() {
        let table = sample();
        let _ = table.keep(&["ID"]);
        assert_eq!(table, sample());
    }

    #[test]
    fn test_order_by_source() {
        let table = sample();
        let ordered = table.order_by_source(&["Action", "ID", "Missing", "Comment"]);
        assert_eq!(ordered, strings(&["ID", "Comment", "Action"]));
    }

    #[test]
    fn test_order_by_source_skips_repeated_headers() {
        let table = TabularData::new(strings(&["ID", "Note", "Note", "Reply"]), vec![]);
        let ordered = table.order_by_source(&["Reply", "Note", "ID"]);
        assert_eq!(ordered, strings(&["ID", "Note", "Reply"]));
    }

    #[test]
    fn test_duplicate_headers() {
        let table = TabularData::new(strings(&["ID", "Note", "Reply", "Note", "Note"]), vec![]);
        assert_eq!(table.duplicate_headers(), strings(&["Note"]));
        assert!(sample().duplicate_headers().is_empty());
    }

    #[test]
    fn test_has_data() {
        assert!(sample().has_data());
        assert!(!TabularData::new(strings(&["ID"]), vec![]).has_data());
    }
}
