//! Delimited text (CSV) reader with encoding and delimiter auto-detection.

use encoding_rs::Encoding;

use crate::error::{ReaderError, ReaderResult};
use crate::table::TabularData;

/// Candidate delimiters, in tie-break order.
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// A leading byte-order mark is removed. Unknown labels fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ReaderResult<String> {
    let Some(encoding) = Encoding::for_label(encoding.as_bytes()) else {
        return Ok(strip_bom(&String::from_utf8_lossy(bytes)).to_string());
    };

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors && used == encoding_rs::UTF_8 {
        // Mis-detected input: keep what can be read
        return Ok(strip_bom(&String::from_utf8_lossy(bytes)).to_string());
    }
    if had_errors {
        return Err(ReaderError::EncodingError {
            encoding: used.name().to_string(),
            message: "input contains malformed byte sequences".to_string(),
        });
    }

    Ok(strip_bom(&text).to_string())
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when no candidate occurs.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = DELIMITERS[0];
    let mut best_count = 0;

    for &sep in &DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// Rows may have any number of fields; quoted fields may span lines.
///
/// # Example
/// ```
/// use rejoinder::reader::parse_csv;
///
/// let table = parse_csv("ID;Comment\nR1.1;\"Hello; World\"", ';').unwrap();
/// assert_eq!(table.headers, vec!["ID", "Comment"]);
/// assert_eq!(table.records[0][1], "Hello; World");
/// ```
pub fn parse_csv(content: &str, delimiter: char) -> ReaderResult<TabularData> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();

    let headers: Vec<String> = match rows.next() {
        Some(row) => row?.iter().map(String::from).collect(),
        None => return Err(ReaderError::EmptyFile),
    };

    let records = rows
        .map(|row| row.map(|r| r.iter().map(String::from).collect()))
        .collect::<Result<Vec<Vec<String>>, ::csv::Error>>()?;

    Ok(TabularData::new(headers, records))
}
