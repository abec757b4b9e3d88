//! Corpus assembly from per-topic source documents.
//!
//! Each topic ships as its own JSON file carrying the topic record plus
//! four question buckets (original/generated × multiple-choice/open).
//! Assembly tags every question with its topic, a type tag and an
//! originality flag, applies the difficulty default, and concatenates
//! everything into one corpus document with freshly computed metadata.
//! Runs strictly before the sanitizing pipeline.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Corpus, McQuestion, Metadata, OpenQuestion, Topic};

/// One per-topic source document.
#[derive(Debug, Deserialize)]
struct TopicFile {
    topic: Topic,
    questions: QuestionBuckets,
}

/// The four named buckets of a topic file.
#[derive(Debug, Default, Deserialize)]
struct QuestionBuckets {
    #[serde(default)]
    mc_existing: Vec<McQuestion>,
    #[serde(default)]
    mc_generated: Vec<McQuestion>,
    #[serde(default)]
    open_existing: Vec<OpenQuestion>,
    #[serde(default)]
    open_generated: Vec<OpenQuestion>,
}

/// Parse a single topic file.
pub fn parse_topic_file(path: &Path) -> Result<(Topic, Vec<McQuestion>, Vec<OpenQuestion>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read topic file: {}", path.display()))?;
    let parsed: TopicFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse topic file: {}", path.display()))?;

    let TopicFile { topic, questions } = parsed;
    let mut mc = Vec::new();
    let mut open = Vec::new();

    for (bucket, original) in [(questions.mc_existing, true), (questions.mc_generated, false)] {
        for mut q in bucket {
            q.topic_id = topic.id;
            q.topic_name = topic.name.clone();
            q.question_type = "mc".into();
            q.is_original = original;
            mc.push(q);
        }
    }

    for (bucket, original) in [
        (questions.open_existing, true),
        (questions.open_generated, false),
    ] {
        for mut q in bucket {
            q.topic_id = topic.id;
            q.topic_name = topic.name.clone();
            q.question_type = "open".into();
            q.is_original = original;
            open.push(q);
        }
    }

    Ok((topic, mc, open))
}

/// Load every `topic_*.json` file from a directory, in filename order.
pub fn load_topic_directory(dir: &Path) -> Result<Vec<(Topic, Vec<McQuestion>, Vec<OpenQuestion>)>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "json")
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("topic_"))
        })
        .collect();
    paths.sort();

    let mut loaded = Vec::new();
    for path in paths {
        match parse_topic_file(&path) {
            Ok(parsed) => loaded.push(parsed),
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
            }
        }
    }

    Ok(loaded)
}

/// Concatenate parsed topic files into one corpus document.
pub fn combine(
    parsed: Vec<(Topic, Vec<McQuestion>, Vec<OpenQuestion>)>,
    course: &str,
    exam_date: Option<&str>,
) -> Corpus {
    let mut topics = Vec::new();
    let mut mc_questions = Vec::new();
    let mut open_questions = Vec::new();

    for (topic, mc, open) in parsed {
        topics.push(topic);
        mc_questions.extend(mc);
        open_questions.extend(open);
    }

    let mut corpus = Corpus {
        metadata: Metadata {
            course: course.to_string(),
            exam_date: exam_date.map(|d| d.to_string()),
            generated_at: Some(chrono::Utc::now().format("%Y-%m-%d").to_string()),
            ..Metadata::default()
        },
        topics,
        mc_questions,
        open_questions,
    };

    corpus.recompute_counts();
    corpus.apply_source_labels();
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, SourceType};

    const TOPIC_FILE: &str = r#"{
        "topic": {
            "id": 3,
            "name": "Standard Effects of Power",
            "keyConcepts": ["Approach-Inhibition", "Disinhibition"],
            "focus": "Power activates the approach system."
        },
        "questions": {
            "mc_existing": [{
                "id": "t3-mc-1",
                "stem": "What does power increase?",
                "options": [
                    {"text": "Action orientation", "correct": true},
                    {"text": "Inhibition", "correct": false}
                ]
            }],
            "mc_generated": [{
                "id": "t3-mc-2",
                "stem": "Which system does power activate?",
                "difficulty": "hard",
                "options": [
                    {"text": "Approach", "correct": true},
                    {"text": "Avoidance", "correct": false}
                ]
            }],
            "open_existing": [{
                "id": "t3-open-1",
                "stem": "Describe the approach-inhibition model.",
                "modelAnswer": "Power activates approach; powerlessness inhibition."
            }]
        }
    }"#;

    #[test]
    fn parse_tags_topic_and_originality() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topic_03_power.json");
        std::fs::write(&path, TOPIC_FILE).unwrap();

        let (topic, mc, open) = parse_topic_file(&path).unwrap();

        assert_eq!(topic.id, 3);
        assert_eq!(mc.len(), 2);
        assert_eq!(open.len(), 1);

        assert!(mc[0].is_original);
        assert!(!mc[1].is_original);
        assert_eq!(mc[0].topic_id, 3);
        assert_eq!(mc[0].topic_name, "Standard Effects of Power");
        assert_eq!(mc[0].question_type, "mc");
        assert_eq!(open[0].question_type, "open");
        assert!(open[0].is_original);

        // Difficulty default applies where absent, explicit value survives.
        assert_eq!(mc[0].difficulty, Difficulty::Medium);
        assert_eq!(mc[1].difficulty, Difficulty::Hard);
    }

    #[test]
    fn combine_builds_metadata_and_source_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topic_03_power.json");
        std::fs::write(&path, TOPIC_FILE).unwrap();

        let parsed = load_topic_directory(dir.path()).unwrap();
        let corpus = combine(parsed, "Social Psychology of Power", Some("2026-02-04"));

        assert_eq!(corpus.metadata.course, "Social Psychology of Power");
        assert_eq!(corpus.metadata.total_topics, 1);
        assert_eq!(corpus.metadata.total_mc_questions, 2);
        assert_eq!(corpus.metadata.total_open_questions, 1);
        assert_eq!(corpus.metadata.difficulty_distribution.hard, 1);
        assert_eq!(corpus.mc_questions[0].source_type, Some(SourceType::Student));
        assert_eq!(corpus.mc_questions[1].source_type, Some(SourceType::Ai));
        assert!(crate::store::validate_corpus(&corpus).is_ok());
    }

    #[test]
    fn directory_loader_skips_non_topic_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("topic_01_a.json"), TOPIC_FILE).unwrap();
        std::fs::write(dir.path().join("notes.json"), "{}").unwrap();
        std::fs::write(dir.path().join("topic_02_broken.json"), "{ nope").unwrap();

        let loaded = load_topic_directory(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
