use thiserror::Error;

/// Error types for manuscript operations.
/// These are used by both the library and binary crates.
#[derive(Error, Debug)]
pub enum ManuscriptError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Marker line '{marker}' not found in {document}; refusing to discard the whole document")]
    MarkerNotFound { marker: String, document: String },

    #[error("Backup {backup} does not match {source_path} (sha256 {expected} != {actual})")]
    BackupMismatch {
        source_path: String,
        backup: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("{tool} exited with {status}{}", stderr_suffix(.stderr))]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("{tool} timed out after {secs} seconds")]
    Timeout { tool: String, secs: u64 },

    #[error("{tool} produced unreadable output: {detail}")]
    InvalidOutput { tool: String, detail: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ManuscriptError>;

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

impl ManuscriptError {
    pub(crate) fn tool_failed(tool: &str, status: std::process::ExitStatus, stderr: &str) -> Self {
        let status = match status.code() {
            Some(code) => format!("status {}", code),
            None => "signal".to_string(),
        };
        ManuscriptError::ToolFailed {
            tool: tool.to_string(),
            status,
            stderr: stderr.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_not_found_names_document() {
        let err = ManuscriptError::MarkerNotFound {
            marker: "Introduction".to_string(),
            document: "README.md".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Introduction'"));
        assert!(msg.contains("README.md"));
    }

    #[test]
    fn test_tool_failed_trims_stderr() {
        let err = ManuscriptError::ToolFailed {
            tool: "pandoc".to_string(),
            status: "status 64".to_string(),
            stderr: "unknown option".to_string(),
        };
        assert_eq!(err.to_string(), "pandoc exited with status 64: unknown option");
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_failed_without_stderr() {
        let status = std::process::Command::new("sh")
            .args(["-c", "exit 1"])
            .status()
            .unwrap();
        let err = ManuscriptError::tool_failed("hunspell", status, "  ");
        assert_eq!(err.to_string(), "hunspell exited with status 1");
    }
}
