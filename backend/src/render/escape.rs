//! Markup escaping for LaTeX and Typst.
//!
//! Each escaper is one simultaneous multi-pattern replacement: the input is
//! scanned once and every reserved character is replaced in place, so a
//! backslash emitted for `&` is never itself escaped again.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

use crate::table::TabularData;

const LATEX_RESERVED: [&str; 10] = ["\\", "{", "}", "$", "&", "#", "_", "%", "~", "^"];
const LATEX_REPLACEMENTS: [&str; 10] = [
    "\\textbackslash{}",
    "\\{",
    "\\}",
    "\\$",
    "\\&",
    "\\#",
    "\\_",
    "\\%",
    "\\textasciitilde{}",
    "\\textasciicircum{}",
];

const TYPST_RESERVED: [&str; 6] = ["\\", "{", "}", "[", "]", "#"];
const TYPST_REPLACEMENTS: [&str; 6] = ["\\\\", "\\{", "\\}", "\\[", "\\]", "\\#"];

// Automata are built once, thread-safe
static LATEX_ESCAPER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(LATEX_RESERVED).expect("Failed to build LaTeX escaper"));

static TYPST_ESCAPER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(TYPST_RESERVED).expect("Failed to build Typst escaper"));

/// Escape LaTeX special characters.
///
/// ```
/// use rejoinder::render::escape_latex;
/// assert_eq!(escape_latex("100% sure"), "100\\% sure");
/// assert_eq!(escape_latex("a & b"), "a \\& b");
/// ```
#[inline]
pub fn escape_latex(input: &str) -> String {
    LATEX_ESCAPER.replace_all(input, &LATEX_REPLACEMENTS)
}

/// Escape Typst special characters.
///
/// ```
/// use rejoinder::render::escape_typst;
/// assert_eq!(escape_typst("#[x]"), "\\#\\[x\\]");
/// ```
#[inline]
pub fn escape_typst(input: &str) -> String {
    TYPST_ESCAPER.replace_all(input, &TYPST_REPLACEMENTS)
}

/// Apply `escape` to every header and every cell.
pub fn escape_table(table: &TabularData, escape: fn(&str) -> String) -> TabularData {
    TabularData {
        headers: table.headers.iter().map(|h| escape(h)).collect(),
        records: table
            .records
            .iter()
            .map(|row| row.iter().map(|cell| escape(cell)).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_percent_and_dollar() {
        assert_eq!(escape_latex("100% sure"), "100\\% sure");
        assert_eq!(escape_latex("Price is $5"), "Price is \\$5");
    }

    #[test]
    fn test_latex_plain_text_unchanged() {
        let text = "Thank you for the comment. We added Section 4 (see p. 7).";
        assert_eq!(escape_latex(text), text);
    }

    #[test]
    fn test_latex_every_reserved_character() {
        assert_eq!(
            escape_latex("\\{}$&#_%~^"),
            "\\textbackslash{}\\{\\}\\$\\&\\#\\_\\%\\textasciitilde{}\\textasciicircum{}"
        );
    }

    #[test]
    fn test_latex_markup_is_not_passed_through() {
        // Backslash and braces are reserved, so commands are neutralised.
        assert_eq!(
            escape_latex("\\cite{bauer2025}"),
            "\\textbackslash{}cite\\{bauer2025\\}"
        );
    }

    #[test]
    fn test_latex_no_double_escaping() {
        // The "\" produced for "&" must not become "\textbackslash{}".
        assert_eq!(escape_latex("&"), "\\&");
        assert_eq!(escape_latex("\\&"), "\\textbackslash{}\\&");
        // Braces emitted by "\textbackslash{}" must not be escaped either.
        assert_eq!(escape_latex("\\"), "\\textbackslash{}");
    }

    #[test]
    fn test_typst_reserved_characters() {
        assert_eq!(escape_typst("\\{[#]}"), "\\\\\\{\\[\\#\\]\\}");
    }

    #[test]
    fn test_typst_leaves_latex_only_characters() {
        assert_eq!(escape_typst("50% of $x_1 & ~y^2"), "50% of $x_1 & ~y^2");
    }

    #[test]
    fn test_escape_unicode_preserved() {
        assert_eq!(escape_latex("Größe & Maß"), "Größe \\& Maß");
        assert_eq!(escape_typst("résumé #1"), "résumé \\#1");
    }

    #[test]
    fn test_escape_table() {
        let table = TabularData::new(
            vec!["ID".into(), "Comment_1".into()],
            vec![vec!["R1.1".into(), "costs 5$".into()], vec![]],
        );
        let escaped = escape_table(&table, escape_latex);
        assert_eq!(escaped.headers, vec!["ID", "Comment\\_1"]);
        assert_eq!(escaped.records[0], vec!["R1.1", "costs 5\\$"]);
        assert!(escaped.records[1].is_empty());
    }
}
