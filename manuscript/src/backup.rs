//! Backup copies and atomic file replacement.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ManuscriptError, Result};

/// A verified byte-exact copy of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub source: PathBuf,
    pub path: PathBuf,
    /// Hex SHA-256 of the copied bytes.
    pub sha256: String,
}

/// Default backup location: `<file>.bak` next to the file.
pub fn default_backup_path(document: &Path) -> PathBuf {
    let mut name = document
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".bak");
    document.with_file_name(name)
}

/// Hex SHA-256 of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManuscriptError::FileNotFound(path.display().to_string()),
        _ => ManuscriptError::Io(e),
    })
}

/// Copy `source` to `backup_path` and verify the copy by digest.
pub fn create_backup(source: &Path, backup_path: &Path) -> Result<Backup> {
    let bytes = read_bytes(source)?;
    let expected = sha256_hex(&bytes);

    fs::write(backup_path, &bytes)?;

    let actual = sha256_hex(&fs::read(backup_path)?);
    if actual != expected {
        return Err(ManuscriptError::BackupMismatch {
            source_path: source.display().to_string(),
            backup: backup_path.display().to_string(),
            expected,
            actual,
        });
    }

    debug!(source = %source.display(), backup = %backup_path.display(), sha256 = %expected, "backup created");

    Ok(Backup {
        source: source.to_path_buf(),
        path: backup_path.to_path_buf(),
        sha256: expected,
    })
}

/// Replace `dest` with `contents` via a temp file in the same directory.
///
/// `dest` is only touched by the final rename.
pub fn replace_atomically(dest: &Path, contents: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".manuscript-")
        .suffix(".tmp")
        .tempfile_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    // Keep the original permissions on the replacement.
    if let Ok(meta) = fs::metadata(dest) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }

    tmp.persist(dest).map_err(|e| ManuscriptError::Io(e.error))?;
    debug!(dest = %dest.display(), bytes = contents.len(), "replaced file");
    Ok(())
}
