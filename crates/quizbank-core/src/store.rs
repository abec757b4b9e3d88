//! Corpus document loading, validation, and atomic saving.
//!
//! The store is the only place the pipeline touches the filesystem: load the
//! whole document, validate it fail-fast, and on save write a sibling temp
//! file first so the previous document survives any mid-write failure.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::SchemaError;
use crate::model::Corpus;

/// Load a corpus document from a JSON file and validate it.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus file: {}", path.display()))?;

    let corpus: Corpus = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse corpus JSON: {}", path.display()))?;

    validate_corpus(&corpus)
        .with_context(|| format!("corpus failed schema validation: {}", path.display()))?;

    Ok(corpus)
}

/// Save a corpus document, replacing the target only on full success.
///
/// Serialization happens entirely in memory; the bytes go to a temp file in
/// the same directory and the rename is the commit point.
pub fn save_corpus(path: &Path, corpus: &Corpus) -> Result<()> {
    let json = serde_json::to_string_pretty(corpus).context("failed to serialize corpus")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("failed to write corpus to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to move corpus into place at {}", path.display()))?;

    Ok(())
}

/// Check the structural invariants every stage relies on.
///
/// A violation makes the whole run fail rather than silently skipping the
/// malformed record — skipping would corrupt the aggregate counts.
pub fn validate_corpus(corpus: &Corpus) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for q in &corpus.mc_questions {
        if !seen.insert(q.id.as_str()) {
            return Err(SchemaError::DuplicateId { id: q.id.clone() });
        }
        if q.options.len() < 2 {
            return Err(SchemaError::TooFewOptions {
                id: q.id.clone(),
                count: q.options.len(),
            });
        }
        if q.correct_count() == 0 {
            return Err(SchemaError::NoCorrectOption { id: q.id.clone() });
        }
        if q.options.iter().any(|o| o.text.trim().is_empty()) {
            return Err(SchemaError::EmptyOptionText { id: q.id.clone() });
        }
    }

    for q in &corpus.open_questions {
        if !seen.insert(q.id.as_str()) {
            return Err(SchemaError::DuplicateId { id: q.id.clone() });
        }
    }

    Ok(())
}

/// A soft-quality finding from corpus inspection.
#[derive(Debug, Clone)]
pub struct QualityWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Inspect a corpus for quality issues that are worth flagging but do not
/// block processing.
pub fn inspect_corpus(corpus: &Corpus) -> Vec<QualityWarning> {
    let mut warnings = Vec::new();

    let topic_ids: HashSet<u32> = corpus.topics.iter().map(|t| t.id).collect();

    for q in &corpus.mc_questions {
        if q.explanation.trim().is_empty() {
            warnings.push(QualityWarning {
                question_id: Some(q.id.clone()),
                message: "explanation is empty".into(),
            });
        }
        if !topic_ids.is_empty() && !topic_ids.contains(&q.topic_id) {
            warnings.push(QualityWarning {
                question_id: Some(q.id.clone()),
                message: format!("references unknown topic id {}", q.topic_id),
            });
        }
        if q.is_multi_select != (q.correct_count() > 1) {
            warnings.push(QualityWarning {
                question_id: Some(q.id.clone()),
                message: "stale isMultiSelect flag, will be recomputed".into(),
            });
        }
    }

    if corpus.metadata.total_mc_questions != corpus.mc_questions.len() {
        warnings.push(QualityWarning {
            question_id: None,
            message: format!(
                "metadata says {} MC questions, document has {}",
                corpus.metadata.total_mc_questions,
                corpus.mc_questions.len()
            ),
        });
    }

    warnings
}
