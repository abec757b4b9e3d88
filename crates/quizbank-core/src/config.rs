//! Configuration loading.
//!
//! All tunable knobs live in `quizbank.toml`: the bias target, pass budget
//! and slack, the filter rule table, the enrichment threshold, and the
//! shuffle seed. The numeric defaults were tuned empirically on real exam
//! material; they are knobs, not constants with inherent meaning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::filter::{default_rules, RelevanceRule};
use crate::rebalancer::RebalanceConfig;

/// Top-level quizbank configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizbankConfig {
    #[serde(default)]
    pub rebalance: RebalanceSection,
    #[serde(default)]
    pub filter: FilterSection,
    #[serde(default)]
    pub enrich: EnrichSection,
    #[serde(default)]
    pub shuffle: ShuffleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceSection {
    /// Stop once the longest-is-correct ratio is at or below this.
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,
    /// Maximum full passes over the corpus.
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
    /// Length gap (in chars) an incorrect option may trail the correct one.
    #[serde(default = "default_slack")]
    pub slack: usize,
}

fn default_target_ratio() -> f64 {
    0.4
}
fn default_max_passes() -> u32 {
    3
}
fn default_slack() -> usize {
    40
}

impl Default for RebalanceSection {
    fn default() -> Self {
        Self {
            target_ratio: default_target_ratio(),
            max_passes: default_max_passes(),
            slack: default_slack(),
        }
    }
}

impl RebalanceSection {
    pub fn to_config(&self) -> RebalanceConfig {
        RebalanceConfig {
            target_ratio: self.target_ratio,
            max_passes: self.max_passes,
            slack: self.slack,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSection {
    /// Replacement rule table; empty means the built-in table applies.
    #[serde(default)]
    pub rules: Vec<RelevanceRule>,
}

impl FilterSection {
    /// The effective rule table for this configuration.
    pub fn effective_rules(&self) -> Vec<RelevanceRule> {
        if self.rules.is_empty() {
            default_rules()
        } else {
            self.rules.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichSection {
    /// Explanations shorter than this (in chars) get the full context block.
    #[serde(default = "default_length_threshold")]
    pub length_threshold: usize,
}

fn default_length_threshold() -> usize {
    crate::enricher::DEFAULT_LENGTH_THRESHOLD
}

impl Default for EnrichSection {
    fn default() -> Self {
        Self {
            length_threshold: default_length_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleSection {
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    42
}

impl Default for ShuffleSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

/// Load configuration from an explicit path, or from `quizbank.toml` in the
/// working directory, falling back to the defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            Some(p.to_path_buf())
        }
        None => {
            let local = PathBuf::from("quizbank.toml");
            local.exists().then_some(local)
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizbankConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tuned_values() {
        let config = QuizbankConfig::default();
        assert!((config.rebalance.target_ratio - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.rebalance.max_passes, 3);
        assert_eq!(config.rebalance.slack, 40);
        assert_eq!(config.enrich.length_threshold, 150);
        assert_eq!(config.shuffle.seed, 42);
        assert!(config.filter.rules.is_empty());
        assert!(!config.filter.effective_rules().is_empty());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let toml_str = r#"
[rebalance]
target_ratio = 0.3

[shuffle]
seed = 7
"#;
        let config: QuizbankConfig = toml::from_str(toml_str).unwrap();
        assert!((config.rebalance.target_ratio - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.rebalance.max_passes, 3);
        assert_eq!(config.shuffle.seed, 7);
    }

    #[test]
    fn custom_filter_rules_replace_the_builtin_table() {
        let toml_str = r#"
[[filter.rules]]
pattern = "off-topic"
category = "scope"
"#;
        let config: QuizbankConfig = toml::from_str(toml_str).unwrap();
        let rules = config.filter.effective_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].category, "scope");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("does-not-exist.toml")));
        assert!(err.is_err());
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizbank.toml");
        std::fs::write(&path, "[rebalance]\nmax_passes = 9\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.rebalance.max_passes, 9);
    }
}
