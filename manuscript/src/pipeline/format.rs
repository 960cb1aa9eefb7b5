//! Truncate at the marker, re-flow, and replace the document.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::backup::{create_backup, replace_atomically, Backup};
use crate::config::ManuscriptConfig;
use crate::convert::{ConvertOptions, Converter};
use crate::document::{read_text, truncate_at_marker, Document};
use crate::error::Result;

/// What to do with the converted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    /// Back up and replace the document
    #[default]
    Write,
    /// Only report whether the document would change
    Check,
    /// Return the output without touching any file
    Stdout,
}

/// Inputs for one format run.
#[derive(Debug, Clone)]
pub struct FormatRequest {
    pub document: PathBuf,
    pub marker: String,
    pub backup_path: PathBuf,
    pub keep_backup: bool,
    pub options: ConvertOptions,
    pub mode: FormatMode,
}

impl FormatRequest {
    pub fn from_config(config: &ManuscriptConfig, mode: FormatMode) -> Self {
        Self {
            document: config.document.clone(),
            marker: config.marker.clone(),
            backup_path: config.backup_path(),
            keep_backup: config.keep_backup,
            options: config.convert.options(),
            mode,
        }
    }
}

/// Result of a format run.
#[derive(Debug, Clone)]
pub struct FormatOutcome {
    /// Converter output differs from the document as it was
    pub changed: bool,
    pub bytes_before: usize,
    pub bytes_after: usize,
    /// Lines discarded ahead of the marker
    pub dropped_lines: usize,
    /// Present in `Write` mode while the backup is kept
    pub backup: Option<Backup>,
    /// Converted text in `Check` and `Stdout` modes
    pub output: Option<String>,
}

/// Run the format pipeline with the given converter.
pub fn format_document(request: &FormatRequest, converter: &dyn Converter) -> Result<FormatOutcome> {
    request.options.validate()?;

    let document = Document::read(&request.document)?;

    // The marker is checked before any backup is written.
    let kept = truncate_at_marker(&document.text, &request.marker, &request.document)?;

    // Write mode converts from the backup snapshot; the other modes never
    // create one.
    let (backup, kept) = match request.mode {
        FormatMode::Write => {
            let backup = create_backup(&request.document, &request.backup_path)?;
            let text = read_text(&backup.path)?;
            let kept = truncate_at_marker(&text, &request.marker, &request.document)?;
            (Some(backup), kept)
        }
        FormatMode::Check | FormatMode::Stdout => (None, kept),
    };
    let dropped_lines = document.lines_before(&request.marker).unwrap_or(0);
    info!(
        document = %request.document.display(),
        marker = %request.marker,
        dropped_lines,
        "truncated at marker"
    );

    let converted = converter.transform(&kept, &request.options)?;
    let changed = converted != document.text;

    let mut outcome = FormatOutcome {
        changed,
        bytes_before: document.text.len(),
        bytes_after: converted.len(),
        dropped_lines,
        backup: None,
        output: None,
    };

    match request.mode {
        FormatMode::Write => {
            replace_atomically(&request.document, converted.as_bytes())?;
            info!(
                document = %request.document.display(),
                converter = converter.name(),
                changed,
                "document replaced"
            );
            outcome.backup = match backup {
                Some(b) if !request.keep_backup => {
                    if let Err(e) = fs::remove_file(&b.path) {
                        warn!(backup = %b.path.display(), error = %e, "could not remove backup");
                        Some(b)
                    } else {
                        None
                    }
                }
                other => other,
            };
        }
        FormatMode::Check | FormatMode::Stdout => {
            outcome.output = Some(converted);
        }
    }

    Ok(outcome)
}
