use std::time::Duration;

use tracing::info;

use super::{ConvertOptions, Converter};
use crate::error::Result;
use crate::process::{run_tool, ToolInvocation};

/// Converter backed by the `pandoc` binary.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    pub binary: String,
    /// Input format passed to `--from`
    pub from: String,
    pub timeout: Option<Duration>,
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self {
            binary: "pandoc".to_string(),
            from: "markdown".to_string(),
            timeout: None,
        }
    }
}

impl PandocConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Default::default()
        }
    }

    /// Command-line arguments for the given options.
    pub fn args(&self, options: &ConvertOptions) -> Vec<String> {
        let mut args = vec![
            format!("--from={}", self.from),
            format!("--to={}", options.target),
            format!("--columns={}", options.columns),
            format!("--tab-stop={}", options.tab_stop),
            format!("--markdown-headings={}", options.heading_style),
        ];
        if options.standalone {
            args.push("--standalone".to_string());
        }
        if options.toc {
            args.push("--toc".to_string());
            args.push(format!("--toc-depth={}", options.toc_depth));
        }
        args
    }
}

impl Converter for PandocConverter {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn transform(&self, text: &str, options: &ConvertOptions) -> Result<String> {
        options.validate()?;
        let invocation = ToolInvocation::new(self.name(), &self.binary)
            .args(self.args(options))
            .stdin(text)
            .timeout(self.timeout);

        info!(binary = %self.binary, bytes = text.len(), "converting document");
        let output = run_tool(&invocation)?;
        Ok(output.stdout)
    }
}
