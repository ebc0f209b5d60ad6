//! Output format selector.
//!
//! Each variant bundles everything that differs between target markups:
//! escaper, identity-column policy, template and file extension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::escape::{escape_latex, escape_typst};

/// Display names of the supported formats, in menu order.
const AVAILABLE: [&str; 2] = ["LaTeX", "Typst"];

/// Target markup language of a rejoinder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Latex,
    Typst,
}

impl OutputFormat {
    /// Parse a format selector, case-insensitively.
    ///
    /// Anything that is not `typst` falls back to LaTeX.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("typst") {
            OutputFormat::Typst
        } else {
            OutputFormat::Latex
        }
    }

    /// Names to offer in a format picker.
    pub fn available() -> &'static [&'static str] {
        &AVAILABLE
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Latex => "LaTeX",
            OutputFormat::Typst => "Typst",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            OutputFormat::Latex => ".tex",
            OutputFormat::Typst => ".typ",
        }
    }

    pub fn escape(self, input: &str) -> String {
        (self.escaper())(input)
    }

    pub(crate) fn escaper(self) -> fn(&str) -> String {
        match self {
            OutputFormat::Latex => escape_latex,
            OutputFormat::Typst => escape_typst,
        }
    }

    /// Whether column 0 (the row identity) is listed among the record fields.
    pub fn includes_identity_column(self) -> bool {
        matches!(self, OutputFormat::Latex)
    }

    pub(crate) fn template_name(self) -> &'static str {
        match self {
            OutputFormat::Latex => "rejoinder.tex",
            OutputFormat::Typst => "rejoinder.typ",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OutputFormat::from_name(s))
    }
}
