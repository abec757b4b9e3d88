//! Shared fixtures for the renderer tests.

use chrono::Utc;
use uuid::Uuid;

use quizbank_core::analyzer::BiasMetrics;
use quizbank_core::enricher::EnrichOutcome;
use quizbank_core::filter::{FilterOutcome, RemovedQuestion};
use quizbank_core::rebalancer::RebalanceOutcome;
use quizbank_core::report::PipelineReport;
use quizbank_core::shuffler::ShuffleOutcome;

pub fn sample_report() -> PipelineReport {
    PipelineReport {
        id: Uuid::nil(),
        created_at: Utc::now(),
        course: "Test Course".into(),
        bias_before: BiasMetrics {
            single_choice: 10,
            multi_select: 2,
            longest_is_correct: 7,
            position_counts: vec![6, 2, 1, 1],
        },
        bias_after: BiasMetrics {
            single_choice: 9,
            multi_select: 2,
            longest_is_correct: 3,
            position_counts: vec![2, 3, 2, 2],
        },
        filter: FilterOutcome {
            removed: vec![RemovedQuestion {
                id: "q-stat-1".into(),
                category: "statistics".into(),
                stem: "What was Cronbachs Alpha in Study 2?".into(),
            }],
            remaining: 11,
        },
        rebalance: RebalanceOutcome {
            passes: 2,
            modifications: 9,
            initial_ratio: 0.7,
            final_ratio: 0.33,
            converged: true,
        },
        enrich: EnrichOutcome {
            full_blocks: 4,
            marker_lines: 3,
            skipped: 4,
        },
        shuffle: ShuffleOutcome {
            shuffled: 11,
            multi_select: 2,
            single_choice: 9,
        },
        source_labels_applied: 11,
        duration_ms: 12,
    }
}
