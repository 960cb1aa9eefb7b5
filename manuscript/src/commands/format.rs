use std::path::PathBuf;

use manuscript::config::ManuscriptConfig;
use manuscript::pipeline::{format_document, FormatMode, FormatRequest};

/// Command-line values that override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub document: Option<PathBuf>,
    pub marker: Option<String>,
    pub columns: Option<u32>,
    pub target: Option<String>,
    pub no_toc: bool,
    pub toc_depth: Option<u8>,
    pub no_backup: bool,
}

impl Overrides {
    pub fn apply(self, config: &mut ManuscriptConfig) {
        if let Some(document) = self.document {
            // A configured backup path belongs to the configured document
            config.backup = None;
            config.document = document;
        }
        if let Some(marker) = self.marker {
            config.marker = marker;
        }
        if let Some(columns) = self.columns {
            config.convert.columns = columns;
        }
        if let Some(target) = self.target {
            config.convert.target = target;
        }
        if self.no_toc {
            config.convert.toc = false;
        }
        if let Some(depth) = self.toc_depth {
            config.convert.toc_depth = depth;
        }
        if self.no_backup {
            config.keep_backup = false;
        }
    }
}

pub fn run(config: &ManuscriptConfig, check: bool, stdout: bool) -> anyhow::Result<u8> {
    config.validate()?;

    let mode = if check {
        FormatMode::Check
    } else if stdout {
        FormatMode::Stdout
    } else {
        FormatMode::Write
    };

    let request = FormatRequest::from_config(config, mode);
    let converter = config.convert.converter();
    let outcome = format_document(&request, &converter)?;

    match mode {
        FormatMode::Check => {
            if outcome.changed {
                println!("{} would be reformatted", config.document.display());
                Ok(1)
            } else {
                println!("{} is already formatted", config.document.display());
                Ok(0)
            }
        }
        FormatMode::Stdout => {
            print!("{}", outcome.output.unwrap_or_default());
            Ok(0)
        }
        FormatMode::Write => {
            if outcome.changed {
                println!(
                    "Formatted {} ({} -> {} bytes, {} lines dropped before '{}')",
                    config.document.display(),
                    outcome.bytes_before,
                    outcome.bytes_after,
                    outcome.dropped_lines,
                    config.marker
                );
            } else {
                println!("{} unchanged", config.document.display());
            }
            if let Some(backup) = outcome.backup {
                println!("  Backup: {}", backup.path.display());
            }
            Ok(0)
        }
    }
}
