//! Explanation enrichment from topic context blocks.
//!
//! Merges each topic's focus summary into its questions' explanations.
//! Short explanations get the full context block behind a separator rule;
//! already-rich explanations get only the takeaway line. The fixed marker
//! string makes the whole pass idempotent: a second run finds the marker
//! and changes nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{text_len, Corpus, Topic};

/// The distinguishing fixed string; its presence means an explanation was
/// already enriched.
pub const CONTEXT_MARKER: &str = "Key takeaway:";

/// Horizontal rule between the original explanation and the context block.
const SEPARATOR: &str = "\n\n────────────────────────────────────────\n\n";

/// Explanations shorter than this (in chars) get the full context block.
pub const DEFAULT_LENGTH_THRESHOLD: usize = 150;

/// Summary of one enrichment run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichOutcome {
    /// Short explanations that received the full context block.
    pub full_blocks: usize,
    /// Long explanations and model answers that received the marker line.
    pub marker_lines: usize,
    /// Questions left alone: marker present, empty explanation, or no
    /// registered context for their topic.
    pub skipped: usize,
}

impl EnrichOutcome {
    pub fn changed(&self) -> usize {
        self.full_blocks + self.marker_lines
    }
}

/// The per-topic supplemental text, derived from the topic record.
fn context_table(topics: &[Topic]) -> HashMap<u32, (String, String)> {
    topics
        .iter()
        .filter(|t| !t.focus.trim().is_empty())
        .map(|t| {
            let takeaway = format!("{CONTEXT_MARKER} {}", t.focus.trim());
            let concepts = if t.key_concepts.is_empty() {
                String::new()
            } else {
                format!("\nKey concepts: {}", t.key_concepts.join(", "))
            };
            (t.id, (takeaway, concepts))
        })
        .collect()
}

/// Enrich every explanation (and open-question model answer) whose topic
/// has a registered context block.
pub fn enrich(corpus: &mut Corpus, length_threshold: usize) -> EnrichOutcome {
    let table = context_table(&corpus.topics);
    let mut outcome = EnrichOutcome::default();

    for q in &mut corpus.mc_questions {
        let Some((takeaway, concepts)) = table.get(&q.topic_id) else {
            outcome.skipped += 1;
            continue;
        };
        if q.explanation.trim().is_empty() || q.explanation.contains(CONTEXT_MARKER) {
            outcome.skipped += 1;
            continue;
        }

        if text_len(&q.explanation) < length_threshold {
            q.explanation = format!("{}{SEPARATOR}{takeaway}{concepts}", q.explanation);
            outcome.full_blocks += 1;
        } else {
            q.explanation = format!("{}\n\n{takeaway}", q.explanation);
            outcome.marker_lines += 1;
        }
    }

    for q in &mut corpus.open_questions {
        let Some((takeaway, _)) = table.get(&q.topic_id) else {
            outcome.skipped += 1;
            continue;
        };
        if q.model_answer.trim().is_empty() || q.model_answer.contains(CONTEXT_MARKER) {
            outcome.skipped += 1;
            continue;
        }
        q.model_answer = format!("{}\n\n{takeaway}", q.model_answer);
        outcome.marker_lines += 1;
    }

    outcome
}
