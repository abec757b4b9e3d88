//! The `quizbank validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::store;

pub fn execute(corpus_path: PathBuf) -> Result<()> {
    let corpus = store::load_corpus(&corpus_path)?;

    println!(
        "Corpus: {} ({} MC, {} open, {} topics)",
        corpus_path.display(),
        corpus.mc_questions.len(),
        corpus.open_questions.len(),
        corpus.topics.len()
    );

    let warnings = store::inspect_corpus(&corpus);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Corpus is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
