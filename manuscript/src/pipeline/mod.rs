//! The two document operations.

pub mod format;
pub mod spell;

pub use format::{format_document, FormatMode, FormatOutcome, FormatRequest};
pub use spell::{spell_report, spell_review};
