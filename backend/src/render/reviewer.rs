//! Reviewer identity: short ids derived from a row's first field.
//!
//! ```text
//! "R2-456.789:123" ──split "."──▶ "R2-456" ──split "-"──▶ "R2"
//!                  ──split ":"──▶ "R2"     ──split " "──▶ "R2"
//! ```

/// Delimiters applied in this exact order; each step keeps the left part.
const ID_DELIMITERS: [char; 4] = ['.', '-', ':', ' '];

/// Derive the short reviewer id from a full comment id.
///
/// This is a fixed cascade, not a "first delimiter wins" search:
/// `"R1:2.3"` is cut at `.` first, then at `:`.
pub fn extract_reviewer_id(full_id: &str) -> &str {
    ID_DELIMITERS.iter().fold(full_id, |id, &delimiter| {
        id.split(delimiter).next().unwrap_or(id)
    })
}

/// Collect the unique reviewer ids of `records`, in order of first appearance.
///
/// Rows without fields are skipped.
pub fn extract_reviewers<R: AsRef<[String]>>(records: &[R]) -> Vec<String> {
    let mut reviewers: Vec<String> = Vec::new();
    for record in records {
        let Some(first) = record.as_ref().first() else {
            continue;
        };
        let id = extract_reviewer_id(first);
        if !reviewers.iter().any(|r| r == id) {
            reviewers.push(id.to_string());
        }
    }
    reviewers
}
