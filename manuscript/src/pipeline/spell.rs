//! Spell-check the document against the custom word list.

use std::path::Path;

use tracing::info;

use crate::document::Document;
use crate::error::{ManuscriptError, Result};
use crate::spell::{SpellChecker, SpellReport, WordList};

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ManuscriptError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Open an interactive review session.
pub fn spell_review(document: &Path, word_list: &Path, checker: &dyn SpellChecker) -> Result<()> {
    require_file(document)?;
    require_file(word_list)?;
    checker.review(document, word_list)
}

/// Collect misspellings without user interaction.
pub fn spell_report(
    document: &Path,
    word_list: &Path,
    checker: &dyn SpellChecker,
) -> Result<SpellReport> {
    let doc = Document::read(document)?;
    let words = WordList::load(word_list)?;

    let mut report = checker.check(&doc.text, &words)?;
    report.document = document.display().to_string();

    info!(
        document = %document.display(),
        checker = checker.name(),
        misspellings = report.misspellings.len(),
        "spell check finished"
    );
    Ok(report)
}
