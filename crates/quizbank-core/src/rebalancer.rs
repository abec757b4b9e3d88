//! Iterative length rebalancing of incorrect options.
//!
//! Uses the analyzer to decide how exploitable the corpus still is and the
//! normalizer to lengthen incorrect options that trail the correct one,
//! looping until the bias ratio meets the target or the pass budget runs
//! out. Never shortens text, never touches correct options, never changes
//! which option is correct.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyzer::analyze;
use crate::model::{text_len, Corpus};
use crate::normalizer;

/// Tunable knobs for the rebalancer. The defaults are the values the
/// source material converged on through manual passes; they carry no
/// meaning beyond that, which is why they live in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceConfig {
    /// Stop once the longest-is-correct ratio drops to this or below.
    pub target_ratio: f64,
    /// Hard ceiling on full passes over the corpus; guarantees termination
    /// even when the target is unreachable.
    pub max_passes: u32,
    /// An incorrect option is only lengthened when it trails the correct
    /// option's char length by more than this.
    pub slack: usize,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            target_ratio: 0.4,
            max_passes: 3,
            slack: 40,
        }
    }
}

/// What a rebalancing run did and how close it got.
///
/// Failing to reach the target is not an error — the final ratio is the
/// quality signal operators use to decide whether to raise the pass budget
/// or accept the residual bias.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceOutcome {
    /// Full passes actually run.
    pub passes: u32,
    /// Total option texts lengthened across all passes.
    pub modifications: usize,
    /// Bias ratio before the first pass.
    pub initial_ratio: f64,
    /// Bias ratio after the last pass.
    pub final_ratio: f64,
    /// Whether the target ratio was reached.
    pub converged: bool,
}

/// Run up to `config.max_passes` rebalancing passes over the corpus.
///
/// Safe to invoke again on already-rebalanced data: the normalizer's
/// membership check makes a second run a no-op, and a zero-modification
/// pass ends the loop early.
pub fn rebalance(corpus: &mut Corpus, config: &RebalanceConfig) -> RebalanceOutcome {
    let initial_ratio = analyze(corpus).longest_ratio();
    let mut final_ratio = initial_ratio;
    let mut modifications = 0;
    let mut passes = 0;

    while passes < config.max_passes && final_ratio > config.target_ratio {
        let changed = run_pass(corpus, config.slack);
        passes += 1;
        modifications += changed;
        final_ratio = analyze(corpus).longest_ratio();

        info!(
            pass = passes,
            changed,
            ratio = final_ratio,
            "rebalance pass complete"
        );

        if changed == 0 {
            // Every remaining option already carries a marker; further
            // passes cannot move the ratio.
            break;
        }
    }

    RebalanceOutcome {
        passes,
        modifications,
        initial_ratio,
        final_ratio,
        converged: final_ratio <= config.target_ratio,
    }
}

/// One full sweep: lengthen every incorrect option of a single-choice
/// question that trails the correct option by more than `slack` chars.
fn run_pass(corpus: &mut Corpus, slack: usize) -> usize {
    let mut changed = 0;

    for q in &mut corpus.mc_questions {
        if !q.is_single_choice() {
            continue;
        }
        let Some(correct_len) = q.correct_len() else {
            continue;
        };
        let threshold = correct_len.saturating_sub(slack);

        for (idx, opt) in q.options.iter_mut().enumerate() {
            if opt.correct || text_len(&opt.text) >= threshold {
                continue;
            }
            let lengthened = normalizer::lengthen(&opt.text, idx);
            if lengthened != opt.text {
                debug!(question = %q.id, option = idx, "lengthened option");
                opt.text = lengthened;
                changed += 1;
            }
        }
    }

    changed
}
