use manuscript::config::ManuscriptConfig;
use manuscript::pipeline::{spell_report, spell_review};

pub fn run(config: &ManuscriptConfig, list: bool, json: bool) -> anyhow::Result<u8> {
    let checker = config.spell.checker();

    if !list {
        spell_review(&config.document, &config.word_list, &checker)?;
        return Ok(0);
    }

    let report = spell_report(&config.document, &config.word_list, &checker)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for m in &report.misspellings {
            if m.suggestions.is_empty() {
                println!("{}:{}", m.line, m.word);
            } else {
                println!("{}:{} ({})", m.line, m.word, m.suggestions.join(", "));
            }
        }
        if !report.is_clean() {
            eprintln!(
                "{} misspellings ({} distinct) in {}",
                report.misspellings.len(),
                report.unique_words().len(),
                report.document
            );
        }
    }

    Ok(if report.is_clean() { 0 } else { 1 })
}
