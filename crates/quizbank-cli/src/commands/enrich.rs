//! The `quizbank enrich` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::config::load_config_from;
use quizbank_core::enricher;
use quizbank_core::store;

pub fn execute(
    corpus_path: PathBuf,
    output: Option<PathBuf>,
    threshold: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let threshold = threshold.unwrap_or(config.enrich.length_threshold);

    let mut corpus = store::load_corpus(&corpus_path)?;
    let outcome = enricher::enrich(&mut corpus, threshold);

    let target = output.unwrap_or(corpus_path);
    store::save_corpus(&target, &corpus)?;

    println!(
        "Enriched {} explanation(s): {} full block(s), {} marker line(s), {} skipped",
        outcome.changed(),
        outcome.full_blocks,
        outcome.marker_lines,
        outcome.skipped
    );
    println!("Saved: {}", target.display());

    Ok(())
}
