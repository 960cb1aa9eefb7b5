//! The document being maintained and the marker truncation rule.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ManuscriptError, Result};

/// A text document on disk.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    /// Read a document, mapping a missing file to `FileNotFound`.
    pub fn read(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Number of lines before the first marker line, if the marker exists.
    pub fn lines_before(&self, marker: &str) -> Option<usize> {
        marker_offset(&self.text, marker).map(|offset| self.text[..offset].lines().count())
    }
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManuscriptError::FileNotFound(path.display().to_string()),
        _ => ManuscriptError::Io(e),
    })
}

/// Byte offset where the first line exactly equal to `marker` starts.
///
/// Only the line terminator (`\n` or `\r\n`) is ignored when comparing.
pub fn marker_offset(text: &str, marker: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let content = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);
        if content == marker {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Keep everything from the first marker line (inclusive) to the end.
///
/// `document` is only used to name the file in the error.
pub fn truncate_at_marker(text: &str, marker: &str, document: &Path) -> Result<String> {
    match marker_offset(text, marker) {
        Some(offset) => Ok(text[offset..].to_string()),
        None => Err(ManuscriptError::MarkerNotFound {
            marker: marker.to_string(),
            document: document.display().to_string(),
        }),
    }
}
