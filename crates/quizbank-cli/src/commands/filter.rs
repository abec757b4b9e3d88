//! The `quizbank filter` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::config::load_config_from;
use quizbank_core::filter;
use quizbank_core::store;

pub fn execute(
    corpus_path: PathBuf,
    output: Option<PathBuf>,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let rules = config.filter.effective_rules();

    if dry_run {
        let corpus = store::load_corpus(&corpus_path)?;
        let hits = filter::classify(&corpus, &rules)?;
        println!("Would remove {} question(s):", hits.len());
        for hit in &hits {
            println!("  {} [{}] {}", hit.id, hit.category, hit.stem);
        }
        return Ok(());
    }

    let mut corpus = store::load_corpus(&corpus_path)?;
    let outcome = filter::apply_filter(&mut corpus, &rules)?;

    let target = output.unwrap_or(corpus_path);
    store::save_corpus(&target, &corpus)?;

    println!(
        "Removed {} question(s), {} remaining",
        outcome.removed.len(),
        outcome.remaining
    );
    for removed in &outcome.removed {
        println!("  {} [{}] {}", removed.id, removed.category, removed.stem);
    }
    println!("Saved: {}", target.display());

    Ok(())
}
