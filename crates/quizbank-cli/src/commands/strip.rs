//! The `quizbank strip` command.
//!
//! Batch inverse of the rebalancer: removes every known filler marker from
//! option texts, restoring the pre-marker wording.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::normalizer;
use quizbank_core::store;

pub fn execute(corpus_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let mut corpus = store::load_corpus(&corpus_path)?;

    let mut stripped = 0;
    for q in &mut corpus.mc_questions {
        for opt in &mut q.options {
            let cleaned = normalizer::strip(&opt.text);
            if cleaned != opt.text {
                opt.text = cleaned;
                stripped += 1;
            }
        }
    }

    let target = output.unwrap_or(corpus_path);
    store::save_corpus(&target, &corpus)?;

    println!("Stripped filler markers from {stripped} option(s)");
    println!("Saved: {}", target.display());

    Ok(())
}
