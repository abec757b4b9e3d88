//! The `quizbank rebalance` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::config::load_config_from;
use quizbank_core::rebalancer;
use quizbank_core::store;

pub fn execute(
    corpus_path: PathBuf,
    output: Option<PathBuf>,
    target_ratio: Option<f64>,
    max_passes: Option<u32>,
    slack: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut rebalance_config = config.rebalance.to_config();
    if let Some(ratio) = target_ratio {
        anyhow::ensure!(
            (0.0..=1.0).contains(&ratio),
            "target ratio must be between 0.0 and 1.0"
        );
        rebalance_config.target_ratio = ratio;
    }
    if let Some(passes) = max_passes {
        anyhow::ensure!(passes >= 1, "pass budget must be at least 1");
        rebalance_config.max_passes = passes;
    }
    if let Some(slack) = slack {
        rebalance_config.slack = slack;
    }

    let mut corpus = store::load_corpus(&corpus_path)?;
    let outcome = rebalancer::rebalance(&mut corpus, &rebalance_config);

    let target = output.unwrap_or(corpus_path);
    store::save_corpus(&target, &corpus)?;

    println!(
        "Rebalanced in {} pass(es): {} option(s) lengthened",
        outcome.passes, outcome.modifications
    );
    println!(
        "Longest-is-correct ratio: {:.1}% -> {:.1}%",
        outcome.initial_ratio * 100.0,
        outcome.final_ratio * 100.0
    );
    if !outcome.converged {
        println!(
            "Target ratio {:.1}% not reached within {} pass(es); consider raising the budget.",
            rebalance_config.target_ratio * 100.0,
            rebalance_config.max_passes
        );
    }
    println!("Saved: {}", target.display());

    Ok(())
}
