//! Persisted analysis snapshots and pipeline run reports.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyzer::BiasMetrics;
use crate::enricher::EnrichOutcome;
use crate::filter::FilterOutcome;
use crate::model::Corpus;
use crate::rebalancer::RebalanceOutcome;
use crate::shuffler::ShuffleOutcome;

/// A durable snapshot of the analyzer's view of one corpus.
///
/// Position counts are order-dependent, so a snapshot is only comparable to
/// another taken at the same pipeline position (both pre-shuffle or both
/// post-shuffle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub course: String,
    pub mc_questions: usize,
    pub open_questions: usize,
    pub metrics: BiasMetrics,
}

impl AnalysisReport {
    pub fn new(corpus: &Corpus, metrics: BiasMetrics) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            course: corpus.metadata.course.clone(),
            mc_questions: corpus.mc_questions.len(),
            open_questions: corpus.open_questions.len(),
            metrics,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }

    /// Compare this snapshot against a baseline taken earlier.
    pub fn compare(&self, baseline: &AnalysisReport) -> BiasDelta {
        BiasDelta {
            baseline_ratio: baseline.metrics.longest_ratio(),
            current_ratio: self.metrics.longest_ratio(),
            baseline_questions: baseline.mc_questions,
            current_questions: self.mc_questions,
            baseline_positions: baseline.metrics.position_counts.clone(),
            current_positions: self.metrics.position_counts.clone(),
        }
    }
}

/// Result of comparing two analysis snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasDelta {
    pub baseline_ratio: f64,
    pub current_ratio: f64,
    pub baseline_questions: usize,
    pub current_questions: usize,
    pub baseline_positions: Vec<usize>,
    pub current_positions: Vec<usize>,
}

impl BiasDelta {
    /// Negative means the corpus got harder to game.
    pub fn ratio_delta(&self) -> f64 {
        self.current_ratio - self.baseline_ratio
    }

    pub fn improved(&self) -> bool {
        self.ratio_delta() < 0.0
    }

    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!(
            "**Longest-is-correct ratio:** {:.1}% -> {:.1}% ({:+.1}%)\n\n",
            self.baseline_ratio * 100.0,
            self.current_ratio * 100.0,
            self.ratio_delta() * 100.0
        ));
        md.push_str(&format!(
            "**MC questions:** {} -> {}\n\n",
            self.baseline_questions, self.current_questions
        ));

        md.push_str("| Position | Baseline | Current |\n|----------|----------|---------|\n");
        let k = self.baseline_positions.len().max(self.current_positions.len());
        for pos in 0..k {
            let letter = (b'A' + pos as u8) as char;
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                letter,
                self.baseline_positions.get(pos).copied().unwrap_or(0),
                self.current_positions.get(pos).copied().unwrap_or(0)
            ));
        }
        md
    }
}

/// Everything one full pipeline run did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub course: String,
    /// Analyzer view before any stage ran (stored order).
    pub bias_before: BiasMetrics,
    /// Analyzer view after the shuffler (post-shuffle order).
    pub bias_after: BiasMetrics,
    pub filter: FilterOutcome,
    pub rebalance: RebalanceOutcome,
    pub enrich: EnrichOutcome,
    pub shuffle: ShuffleOutcome,
    pub source_labels_applied: usize,
    pub duration_ms: u64,
}

impl PipelineReport {
    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse report JSON")
}
