//! High-level API: from a read table and a column selection to rejoinder text.
//!
//! ```text
//! TabularData ──order_by_source──▶ selection ──keep──▶ TabularData ──Renderer──▶ Rejoinder
//! ```
//!
//! # Example
//!
//! ```
//! use rejoinder::pipeline::{generate, GenerateOptions};
//! use rejoinder::{OutputFormat, TabularData, TemplateEngine};
//!
//! let engine = TemplateEngine::embedded().unwrap();
//! let table = TabularData::new(
//!     vec!["ID".into(), "Internal".into(), "Comment".into(), "Response".into()],
//!     vec![vec!["R1.1".into(), "skip me".into(), "Typo".into(), "Fixed".into()]],
//! );
//! let options = GenerateOptions::new(vec!["Response".into(), "ID".into(), "Comment".into()])
//!     .with_format(OutputFormat::Latex);
//!
//! let rejoinder = generate(&table, &options, &engine).unwrap();
//! assert_eq!(rejoinder.file_name("reviews"), "reviews.tex");
//! assert!(!rejoinder.content.contains("skip me"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::render::{OutputFormat, TemplateEngine};
use crate::table::TabularData;

/// Fewest columns a rejoinder can be built from: id, comment, response.
pub const MIN_SELECTED_COLUMNS: usize = 3;

/// Options for [`generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Columns to include, any order; the source order is applied.
    pub columns: Vec<String>,
    pub format: OutputFormat,
}

impl GenerateOptions {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// A rendered rejoinder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejoinder {
    pub content: String,
    pub format: OutputFormat,
    pub extension: &'static str,
}

impl Rejoinder {
    /// `stem` plus this rejoinder's extension.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}{}", stem, self.extension)
    }
}

/// Reject selections that cannot make a rejoinder.
///
/// Projection itself accepts any number of columns; this rule belongs to the
/// callers that collect a selection from a user.
pub fn check_selection<S: AsRef<str>>(columns: &[S]) -> PipelineResult<()> {
    if columns.len() < MIN_SELECTED_COLUMNS {
        return Err(PipelineError::UnderSelection {
            required: MIN_SELECTED_COLUMNS,
            selected: columns.len(),
        });
    }
    Ok(())
}

/// Project `table` onto the selected columns (in source order) and render it.
pub fn generate(
    table: &TabularData,
    options: &GenerateOptions,
    engine: &TemplateEngine,
) -> PipelineResult<Rejoinder> {
    let columns = table.order_by_source(&options.columns);
    let kept = table.keep(&columns);

    let renderer = engine.renderer(options.format);
    let content = renderer.render_table(&kept)?;

    Ok(Rejoinder {
        content,
        format: options.format,
        extension: renderer.output_file_extension(),
    })
}

/// File name without its last extension.
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) => &file_name[..pos],
        None => file_name,
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
            strings(&["ID", "Internal", "Comment", "Response", "Action"]),
            vec![
                strings(&["R1.1", "secret note", "Typo", "Fixed", "Sec. 2"]),
                strings(&["R2.1", "", "Unclear", "Reworded"]),
            ],
        )
    }

    #[test]
    fn test_default_options() {
        let opts = GenerateOptions::default();
        assert!(opts.columns.is_empty());
        assert_eq!(opts.format, OutputFormat::Latex);
    }

    #[test]
    fn test_check_selection() {
        assert!(check_selection(&["ID", "Comment", "Response"]).is_ok());
        assert!(check_selection(&["ID", "Comment", "Response", "Action"]).is_ok());

        let err = check_selection(&["ID", "Comment"]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnderSelection { required: 3, selected: 2 }
        ));

        let empty: [&str; 0] = [];
        assert!(check_selection(&empty).is_err());
    }

    #[test]
    fn test_generate_latex_uses_source_order() {
        let engine = TemplateEngine::embedded().unwrap();
        let options = GenerateOptions::new(strings(&["Response", "Comment", "ID"]));
        let rejoinder = generate(&sample(), &options, &engine).unwrap();

        assert_eq!(rejoinder.extension, ".tex");
        assert!(!rejoinder.content.contains("secret note"));
        let comment = rejoinder.content.find("\\textbf{Comment:} Typo").unwrap();
        let response = rejoinder.content.find("\\textbf{Response:} Fixed").unwrap();
        assert!(comment < response);
        assert!(rejoinder.content.contains("\\begin{rejoinderbox}{R1.1}"));
    }

    #[test]
    fn test_generate_typst() {
        let engine = TemplateEngine::embedded().unwrap();
        let options = GenerateOptions::new(strings(&["ID", "Comment", "Response", "Action"]))
            .with_format(OutputFormat::Typst);
        let rejoinder = generate(&sample(), &options, &engine).unwrap();

        assert_eq!(rejoinder.format, OutputFormat::Typst);
        assert_eq!(rejoinder.file_name("reviews"), "reviews.typ");
        assert!(rejoinder.content.contains("== Reviewer R1"));
        assert!(rejoinder.content.contains("*Action:* Sec. 2"));
        // Short row padded
        assert!(rejoinder.content.contains("*Action:* \n"));
    }

    #[test]
    fn test_generate_ignores_unknown_columns() {
        let engine = TemplateEngine::embedded().unwrap();
        let options = GenerateOptions::new(strings(&["ID", "Comment", "Response", "Nope"]));
        assert!(generate(&sample(), &options, &engine).is_ok());
    }

    #[test]
    fn test_generate_leaves_input_untouched() {
        let engine = TemplateEngine::embedded().unwrap();
        let table = sample();
        let options = GenerateOptions::new(strings(&["ID", "Comment", "Response"]));
        let _ = generate(&table, &options, &engine).unwrap();
        assert_eq!(table, sample());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("reviews.csv"), "reviews");
        assert_eq!(file_stem("reviews.v2.xlsx"), "reviews.v2");
        assert_eq!(file_stem("reviews"), "reviews");
        assert_eq!(file_stem(""), "");
    }
}
