//! Seeded, reproducible shuffling of answer options.
//!
//! Permutes every MC question's options with one RNG seeded from the
//! configured seed, then recomputes the derived multi-select flags and the
//! corpus-level counts. Corpus order is part of the document, so the same
//! (seed, document) pair reproduces byte-identical output — which is what
//! test fixtures rely on.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::model::Corpus;

/// Summary of one shuffle run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleOutcome {
    pub shuffled: usize,
    pub multi_select: usize,
    pub single_choice: usize,
}

/// Shuffle every MC question's options and refresh the derived counts.
///
/// Must run after any stage that could change which options exist or their
/// correctness; any position-sensitive analysis afterwards is reading
/// post-shuffle order.
pub fn shuffle(corpus: &mut Corpus, seed: u64) -> ShuffleOutcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut shuffled = 0;

    for q in &mut corpus.mc_questions {
        q.options.shuffle(&mut rng);
        shuffled += 1;
    }

    corpus.recompute_counts();

    ShuffleOutcome {
        shuffled,
        multi_select: corpus.metadata.multi_select_questions,
        single_choice: corpus.metadata.single_choice_questions,
    }
}
