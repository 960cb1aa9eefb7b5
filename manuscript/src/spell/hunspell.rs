use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use super::{Misspelling, SpellChecker, SpellReport, WordList};
use crate::error::{ManuscriptError, Result};
use crate::process::{run_interactive, run_tool, ToolInvocation};

/// Spell checker backed by the `hunspell` binary.
#[derive(Debug, Clone)]
pub struct HunspellChecker {
    pub binary: String,
    /// Dictionary name passed to `-d`, e.g. `en_US`
    pub language: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for HunspellChecker {
    fn default() -> Self {
        Self {
            binary: "hunspell".to_string(),
            language: None,
            timeout: None,
        }
    }
}

impl HunspellChecker {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Default::default()
        }
    }

    fn base_args(&self, word_list: Option<&Path>) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(ref lang) = self.language {
            args.push("-d".to_string());
            args.push(lang.clone());
        }
        if let Some(path) = word_list {
            args.push("-p".to_string());
            args.push(path.display().to_string());
        }
        args
    }

    /// Arguments for the interactive session.
    pub fn review_args(&self, document: &Path, word_list: &Path) -> Vec<String> {
        let mut args = self.base_args(Some(word_list));
        args.push(document.display().to_string());
        args
    }

    /// Arguments for pipe mode.
    pub fn pipe_args(&self, word_list: Option<&Path>) -> Vec<String> {
        let mut args = self.base_args(word_list);
        args.push("-a".to_string());
        args
    }
}

/// Prefix every line with `^` so hunspell never reads it as a command.
pub fn pipe_input(text: &str) -> String {
    let mut input = String::with_capacity(text.len() + text.len() / 40);
    for line in text.lines() {
        input.push('^');
        input.push_str(line);
        input.push('\n');
    }
    input
}

/// Parse hunspell `-a` output.
///
/// Each input line yields zero or more result lines followed by a blank
/// line. `&` and `?` carry suggestions, `#` has none.
pub fn parse_pipe_output(output: &str) -> Result<Vec<Misspelling>> {
    let mut misspellings = Vec::new();
    let mut line_no = 1;

    for raw in output.lines() {
        if raw.starts_with("@(#)") {
            continue;
        }
        if raw.is_empty() {
            line_no += 1;
            continue;
        }

        match raw.chars().next() {
            Some('&') | Some('?') => {
                let (head, tail) = raw.split_once(':').ok_or_else(|| invalid(raw))?;
                let word = head.split_whitespace().nth(1).ok_or_else(|| invalid(raw))?;
                let suggestions = tail
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                misspellings.push(Misspelling {
                    word: word.to_string(),
                    line: line_no,
                    suggestions,
                });
            }
            Some('#') => {
                let word = raw.split_whitespace().nth(1).ok_or_else(|| invalid(raw))?;
                misspellings.push(Misspelling {
                    word: word.to_string(),
                    line: line_no,
                    suggestions: Vec::new(),
                });
            }
            // `*`, `+`, `-`: accepted words
            _ => {}
        }
    }

    Ok(misspellings)
}

fn invalid(line: &str) -> ManuscriptError {
    ManuscriptError::InvalidOutput {
        tool: "hunspell".to_string(),
        detail: format!("unexpected line '{}'", line),
    }
}

impl SpellChecker for HunspellChecker {
    fn name(&self) -> &str {
        "hunspell"
    }

    fn check(&self, text: &str, dictionary: &WordList) -> Result<SpellReport> {
        let invocation = ToolInvocation::new(self.name(), &self.binary)
            .args(self.pipe_args(dictionary.path.as_deref()))
            .stdin(pipe_input(text))
            .timeout(self.timeout);

        let output = run_tool(&invocation)?;
        let found = parse_pipe_output(&output.stdout)?;
        let total = found.len();

        let misspellings: Vec<Misspelling> = found
            .into_iter()
            .filter(|m| !dictionary.contains(&m.word))
            .collect();
        debug!(reported = total, kept = misspellings.len(), "filtered against word list");

        Ok(SpellReport {
            document: String::new(),
            misspellings,
        })
    }

    fn review(&self, document: &Path, word_list: &Path) -> Result<()> {
        info!(document = %document.display(), word_list = %word_list.display(), "starting spell review");
        run_interactive(self.name(), &self.binary, &self.review_args(document, word_list))
    }
}
