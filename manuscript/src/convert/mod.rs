//! Document conversion.
//!
//! The format pipeline only depends on the [`Converter`] trait; pandoc is
//! the default implementation.

pub mod pandoc;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ManuscriptError, Result};

pub use pandoc::PandocConverter;

/// Heading notation in the converted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// Underlined with `===` / `---`; the heading text stays a line of its
    /// own, so a marker heading survives repeated runs
    #[default]
    Setext,
}

impl fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingStyle::Atx => write!(f, "atx"),
            HeadingStyle::Setext => write!(f, "setext"),
        }
    }
}

impl FromStr for HeadingStyle {
    type Err = ManuscriptError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "atx" => Ok(HeadingStyle::Atx),
            "setext" => Ok(HeadingStyle::Setext),
            other => Err(ManuscriptError::InvalidOption(format!(
                "heading style '{}' (expected 'atx' or 'setext')",
                other
            ))),
        }
    }
}

/// Formatting options passed to a converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Wrap width in columns
    pub columns: u32,
    pub heading_style: HeadingStyle,
    pub tab_stop: u32,
    /// Output markup dialect, e.g. `gfm`
    pub target: String,
    /// Generate a table of contents
    pub toc: bool,
    pub toc_depth: u8,
    /// Emit a standalone document (needed for the ToC)
    pub standalone: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            columns: 80,
            heading_style: HeadingStyle::Setext,
            tab_stop: 4,
            target: "gfm".to_string(),
            toc: true,
            toc_depth: 2,
            standalone: true,
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(ManuscriptError::InvalidOption(
                "columns must be greater than 0".to_string(),
            ));
        }
        if self.tab_stop == 0 {
            return Err(ManuscriptError::InvalidOption(
                "tab_stop must be greater than 0".to_string(),
            ));
        }
        if !(1..=6).contains(&self.toc_depth) {
            return Err(ManuscriptError::InvalidOption(format!(
                "toc_depth must be between 1 and 6, got {}",
                self.toc_depth
            )));
        }
        if self.target.trim().is_empty() {
            return Err(ManuscriptError::InvalidOption(
                "target format cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Something that can re-flow document text.
pub trait Converter {
    /// Short tool name for logs and errors.
    fn name(&self) -> &str;

    /// Transform `text` according to `options`, returning the new text.
    fn transform(&self, text: &str, options: &ConvertOptions) -> Result<String>;
}
