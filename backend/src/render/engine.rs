//! Template engine and per-format renderers.
//!
//! Templates are compiled once into a [`TemplateEngine`] (at startup, from a
//! [`TemplateSet`]) and shared read-only. A [`Renderer`] is a cheap view of
//! the engine for one [`OutputFormat`].
//!
//! # Example
//!
//! ```
//! use rejoinder::{OutputFormat, TabularData, TemplateEngine};
//!
//! let engine = TemplateEngine::embedded().unwrap();
//! let table = TabularData::new(
//!     vec!["ID".into(), "Comment".into(), "Response".into()],
//!     vec![vec!["R1.1".into(), "Typo on p. 3".into(), "Fixed".into()]],
//! );
//!
//! let renderer = engine.renderer(OutputFormat::Typst);
//! let text = renderer.render_table(&table).unwrap();
//! assert!(text.contains("== Reviewer R1"));
//! assert_eq!(renderer.output_file_extension(), ".typ");
//! ```

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::document::Document;
use super::escape::escape_table;
use super::format::OutputFormat;
use crate::error::{RenderError, RenderResult};
use crate::table::TabularData;

/// Compiled-in LaTeX template.
pub const LATEX_TEMPLATE: &str = include_str!("../../templates/rejoinder.tex.j2");

/// Compiled-in Typst template.
pub const TYPST_TEMPLATE: &str = include_str!("../../templates/rejoinder.typ.j2");

/// File names looked up by [`TemplateSet::from_dir`].
const LATEX_FILE: &str = "rejoinder.tex.j2";
const TYPST_FILE: &str = "rejoinder.typ.j2";

/// Template sources, one per format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub latex: String,
    pub typst: String,
}

impl TemplateSet {
    /// The templates shipped with the binary.
    pub fn embedded() -> Self {
        Self {
            latex: LATEX_TEMPLATE.to_string(),
            typst: TYPST_TEMPLATE.to_string(),
        }
    }

    /// Load `rejoinder.tex.j2` / `rejoinder.typ.j2` from `dir`.
    ///
    /// A missing file falls back to the embedded template; any other read
    /// failure is an error.
    pub fn from_dir(dir: impl AsRef<Path>) -> RenderResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            latex: read_or_default(&dir.join(LATEX_FILE), LATEX_TEMPLATE)?,
            typst: read_or_default(&dir.join(TYPST_FILE), TYPST_TEMPLATE)?,
        })
    }

    fn source(&self, format: OutputFormat) -> &str {
        match format {
            OutputFormat::Latex => &self.latex,
            OutputFormat::Typst => &self.typst,
        }
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::embedded()
    }
}

fn read_or_default(path: &Path, default: &str) -> RenderResult<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(default.to_string()),
        Err(source) => Err(RenderError::TemplateIo {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Both format templates, compiled.
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Compile `templates`. Syntax errors are reported here, not at render time.
    pub fn new(templates: TemplateSet) -> RenderResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Cell text is escaped for the target markup before rendering.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for format in [OutputFormat::Latex, OutputFormat::Typst] {
            env.add_template_owned(format.template_name(), templates.source(format).to_string())?;
        }

        Ok(Self { env })
    }

    /// Engine over the embedded templates.
    pub fn embedded() -> RenderResult<Self> {
        Self::new(TemplateSet::embedded())
    }

    pub fn renderer(&self, format: OutputFormat) -> Renderer<'_> {
        Renderer { engine: self, format }
    }
}

/// Renders documents for one output format.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    engine: &'a TemplateEngine,
    format: OutputFormat,
}

impl Renderer<'_> {
    pub fn output_file_extension(&self) -> &'static str {
        self.format.file_extension()
    }

    /// Execute the format's template against `document`.
    pub fn render(&self, document: &Document) -> RenderResult<String> {
        let template = self.engine.env.get_template(self.format.template_name())?;
        Ok(template.render(document)?)
    }

    /// Escape, assemble and render a projected table.
    pub fn render_table(&self, table: &TabularData) -> RenderResult<String> {
        let escaped = escape_table(table, self.format.escaper());
        let document = Document::assemble(&escaped, self.format);
        self.render(&document)
    }
}
