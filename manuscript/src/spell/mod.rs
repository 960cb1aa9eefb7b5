//! Spell checking against a custom word list.

pub mod hunspell;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::read_text;
use crate::error::Result;

pub use hunspell::HunspellChecker;

/// Extra accepted vocabulary, one word per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    pub path: Option<PathBuf>,
    words: BTreeSet<String>,
}

impl WordList {
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        let mut list = Self::parse(&text);
        list.path = Some(path.to_path_buf());
        Ok(list)
    }

    /// Parse word list text. Blank lines are skipped, as is a leading
    /// word-count line in hunspell `.dic` style.
    pub fn parse(text: &str) -> Self {
        let mut words = BTreeSet::new();
        for (idx, line) in text.lines().enumerate() {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            if idx == 0 && word.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            words.insert(word.to_string());
        }
        Self { path: None, words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// A word the checker did not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Misspelling {
    pub word: String,
    /// 1-based line in the checked text
    pub line: usize,
    pub suggestions: Vec<String>,
}

/// Findings of a non-interactive spell check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpellReport {
    pub document: String,
    pub misspellings: Vec<Misspelling>,
}

impl SpellReport {
    pub fn is_clean(&self) -> bool {
        self.misspellings.is_empty()
    }

    /// Distinct misspelled words, sorted.
    pub fn unique_words(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.misspellings.iter().map(|m| m.word.as_str()).collect();
        set.into_iter().collect()
    }
}

/// Something that can spell-check a document.
pub trait SpellChecker {
    fn name(&self) -> &str;

    /// Check `text`, treating `dictionary` as accepted vocabulary.
    fn check(&self, text: &str, dictionary: &WordList) -> Result<SpellReport>;

    /// Interactive review session on the user's terminal.
    fn review(&self, document: &Path, word_list: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_list() {
        let list = WordList::parse("rosbag\nEigen\n\n  colcon  \n");
        assert_eq!(list.len(), 3);
        assert!(list.contains("rosbag"));
        assert!(list.contains("colcon"));
        assert!(!list.contains("eigen"));
    }

    #[test]
    fn test_parse_skips_dic_header() {
        let list = WordList::parse("2\nURDF\nmutex\n");
        assert_eq!(list.len(), 2);
        assert!(list.contains("URDF"));
        assert!(!list.contains("2"));
    }

    #[test]
    fn test_parse_keeps_slashes_in_words() {
        let list = WordList::parse("TCP/IP\nI/O\n");
        assert!(list.contains("TCP/IP"));
        assert!(list.contains("I/O"));
        assert!(!list.contains("TCP"));
    }

    #[test]
    fn test_numeric_word_after_first_line_is_kept() {
        let list = WordList::parse("word\n2024\n");
        assert!(list.contains("2024"));
    }

    #[test]
    fn test_empty_list() {
        let list = WordList::parse("");
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_load_missing_word_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WordList::load(&dir.path().join("words.dic")).is_err());
    }

    #[test]
    fn test_report_unique_words() {
        let report = SpellReport {
            document: "README.md".to_string(),
            misspellings: vec![
                Misspelling {
                    word: "teh".to_string(),
                    line: 1,
                    suggestions: vec!["the".to_string()],
                },
                Misspelling {
                    word: "adn".to_string(),
                    line: 2,
                    suggestions: vec![],
                },
                Misspelling {
                    word: "teh".to_string(),
                    line: 5,
                    suggestions: vec![],
                },
            ],
        };
        assert!(!report.is_clean());
        assert_eq!(report.unique_words(), vec!["adn", "teh"]);
    }
}
