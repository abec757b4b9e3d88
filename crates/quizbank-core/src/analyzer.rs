//! Bias metrics over a corpus snapshot.
//!
//! Measures how exploitable a question set is for a test-taker without
//! domain knowledge: how often the correct option is the longest, and where
//! correct answers sit positionally. Pure functions of the corpus — no
//! mutation, deterministic on the same snapshot.

use serde::{Deserialize, Serialize};

use crate::model::{text_len, Corpus, McQuestion};

/// Exploitable-signal metrics for one corpus snapshot.
///
/// Position counts index options by their *current stored order*, so reading
/// before vs. after the shuffler yields different distributions — callers
/// must know which order they are looking at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasMetrics {
    /// Questions with exactly one correct option.
    pub single_choice: usize,
    /// Questions with more than one correct option; excluded from the
    /// longest/position denominators.
    pub multi_select: usize,
    /// Single-choice questions whose correct option is strictly the longest.
    pub longest_is_correct: usize,
    /// Histogram of the correct option's 0-based position, over
    /// single-choice questions.
    pub position_counts: Vec<usize>,
}

impl BiasMetrics {
    /// Fraction of single-choice questions where the correct option is
    /// strictly the longest. This is the bias ratio the rebalancer drives
    /// down.
    pub fn longest_ratio(&self) -> f64 {
        if self.single_choice == 0 {
            return 0.0;
        }
        self.longest_is_correct as f64 / self.single_choice as f64
    }

    /// Share of single-choice questions whose correct answer sits at the
    /// given position.
    pub fn position_share(&self, position: usize) -> f64 {
        if self.single_choice == 0 {
            return 0.0;
        }
        let count = self.position_counts.get(position).copied().unwrap_or(0);
        count as f64 / self.single_choice as f64
    }
}

/// Compute bias metrics over a read-only corpus snapshot.
pub fn analyze(corpus: &Corpus) -> BiasMetrics {
    let max_options = corpus
        .mc_questions
        .iter()
        .map(|q| q.options.len())
        .max()
        .unwrap_or(0);

    let mut metrics = BiasMetrics {
        single_choice: 0,
        multi_select: 0,
        longest_is_correct: 0,
        position_counts: vec![0; max_options],
    };

    for q in &corpus.mc_questions {
        if !q.is_single_choice() {
            metrics.multi_select += 1;
            continue;
        }
        metrics.single_choice += 1;

        if longest_is_correct(q) {
            metrics.longest_is_correct += 1;
        }

        if let Some(pos) = q.options.iter().position(|o| o.correct) {
            metrics.position_counts[pos] += 1;
        }
    }

    metrics
}

/// True iff the correct option's text is *strictly* longer than every
/// incorrect option. A tie with a wrong option is no bias hit — the signal
/// is only exploitable when the correct answer is unambiguously the longest.
fn longest_is_correct(q: &McQuestion) -> bool {
    let Some(correct_len) = q.correct_len() else {
        return false;
    };
    q.options
        .iter()
        .filter(|o| !o.correct)
        .all(|o| text_len(&o.text) < correct_len)
}
