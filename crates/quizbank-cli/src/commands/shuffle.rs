//! The `quizbank shuffle` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::config::load_config_from;
use quizbank_core::shuffler;
use quizbank_core::store;

pub fn execute(
    corpus_path: PathBuf,
    output: Option<PathBuf>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let seed = seed.unwrap_or(config.shuffle.seed);

    let mut corpus = store::load_corpus(&corpus_path)?;
    let outcome = shuffler::shuffle(&mut corpus, seed);

    let target = output.unwrap_or(corpus_path);
    store::save_corpus(&target, &corpus)?;

    println!("Shuffled {} question(s) with seed {seed}", outcome.shuffled);
    println!(
        "Multi-select: {} | single-choice: {}",
        outcome.multi_select, outcome.single_choice
    );
    println!("Saved: {}", target.display());

    Ok(())
}
