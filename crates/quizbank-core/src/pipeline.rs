//! The full sanitizing pipeline over one owned corpus value.
//!
//! Filter → rebalance → enrich → shuffle, each stage running to completion
//! before the next begins. There is exactly one writer and it is
//! sequential, so the corpus is threaded through as a single mutable
//! aggregate — no sharing, no locking.

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::analyzer::analyze;
use crate::config::QuizbankConfig;
use crate::enricher::enrich;
use crate::filter::apply_filter;
use crate::model::Corpus;
use crate::rebalancer::rebalance;
use crate::report::PipelineReport;
use crate::shuffler::shuffle;

/// Run every stage in order and assemble the run report.
///
/// `bias_before` is measured on the untouched corpus in stored order;
/// `bias_after` on the final post-shuffle order.
pub fn run_pipeline(corpus: &mut Corpus, config: &QuizbankConfig) -> Result<PipelineReport> {
    let start = Instant::now();
    let bias_before = analyze(corpus);

    let filter_outcome = apply_filter(corpus, &config.filter.effective_rules())?;
    info!(
        removed = filter_outcome.removed.len(),
        remaining = filter_outcome.remaining,
        "relevance filter complete"
    );

    let rebalance_outcome = rebalance(corpus, &config.rebalance.to_config());
    info!(
        passes = rebalance_outcome.passes,
        modifications = rebalance_outcome.modifications,
        converged = rebalance_outcome.converged,
        "rebalancing complete"
    );

    let enrich_outcome = enrich(corpus, config.enrich.length_threshold);
    info!(changed = enrich_outcome.changed(), "enrichment complete");

    let shuffle_outcome = shuffle(corpus, config.shuffle.seed);
    info!(shuffled = shuffle_outcome.shuffled, "shuffle complete");

    let source_labels_applied = corpus.apply_source_labels();

    let bias_after = analyze(corpus);

    Ok(PipelineReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        course: corpus.metadata.course.clone(),
        bias_before,
        bias_after,
        filter: filter_outcome,
        rebalance: rebalance_outcome,
        enrich: enrich_outcome,
        shuffle: shuffle_outcome,
        source_labels_applied,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
