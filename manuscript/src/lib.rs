//! manuscript library
//!
//! Reformat and spell-check a long-form Markdown document through
//! external tools.

pub mod backup;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod process;
pub mod spell;

pub use config::ManuscriptConfig;
pub use error::{ManuscriptError, Result};
