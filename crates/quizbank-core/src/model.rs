//! Core data model types for quizbank.
//!
//! These are the fundamental types the entire quizbank system uses to
//! represent the question corpus: topics, multiple-choice questions with
//! their answer options, and open questions with model answers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The full in-memory question bank plus its metadata.
///
/// The corpus exclusively owns its questions and topics; it is threaded
/// mutably through the pipeline stages, and every stage that changes
/// cardinality or correctness layout calls [`Corpus::recompute_counts`]
/// before handing the value on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpus {
    pub metadata: Metadata,
    #[serde(default)]
    pub topics: Vec<Topic>,
    pub mc_questions: Vec<McQuestion>,
    #[serde(default)]
    pub open_questions: Vec<OpenQuestion>,
}

/// Derived corpus-level counts and course identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub course: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub total_topics: usize,
    #[serde(default)]
    pub total_mc_questions: usize,
    #[serde(default)]
    pub total_open_questions: usize,
    #[serde(default)]
    pub difficulty_distribution: DifficultyDistribution,
    #[serde(default)]
    pub multi_select_questions: usize,
    #[serde(default)]
    pub single_choice_questions: usize,
    /// Running total of questions removed by the relevance filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_questions: Option<usize>,
}

/// How many MC questions sit in each difficulty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    #[serde(default)]
    pub easy: usize,
    #[serde(default)]
    pub medium: usize,
    #[serde(default)]
    pub hard: usize,
}

/// Immutable per-topic reference data, owned by the corpus but never
/// mutated by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub key_papers: Vec<String>,
    /// Free-text summary of what this topic is really about; the enricher
    /// builds its context blocks from this.
    #[serde(default)]
    pub focus: String,
}

/// A multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McQuestion {
    /// Unique identifier within the corpus.
    pub id: String,
    /// The prompt text shown to the test-taker.
    pub stem: String,
    pub options: Vec<AnswerOption>,
    /// Derived: true iff more than one option is correct. Recomputed, never
    /// trusted from stale data, whenever correctness layout could change.
    #[serde(default)]
    pub is_multi_select: bool,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub topic_id: u32,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default = "mc_type")]
    pub question_type: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Provenance: true for human-authored material, false for generated.
    #[serde(default)]
    pub is_original: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

fn mc_type() -> String {
    "mc".to_string()
}

/// A single answer option of an MC question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
}

/// An open-ended question with a model answer instead of options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenQuestion {
    pub id: String,
    pub stem: String,
    #[serde(default)]
    pub model_answer: String,
    #[serde(default)]
    pub topic_id: u32,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default = "open_type")]
    pub question_type: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub is_original: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

fn open_type() -> String {
    "open".to_string()
}

/// Question difficulty tag. Defaults to medium when absent on ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// User-facing provenance tag, derived from `is_original`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Student,
    Ai,
}

impl SourceType {
    /// The label shown next to a question in user-facing output.
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Student => "From course material",
            SourceType::Ai => "AI-generated",
        }
    }
}

/// Length in characters. All length comparisons in the pipeline use char
/// counts, not bytes — the corpus is exam prose with non-ASCII typography.
pub fn text_len(s: &str) -> usize {
    s.chars().count()
}

impl McQuestion {
    /// Number of options flagged correct.
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }

    /// True iff exactly one option is correct. Only single-choice questions
    /// feed the longest/position bias metrics.
    pub fn is_single_choice(&self) -> bool {
        self.correct_count() == 1
    }

    /// Recompute the derived multi-select flag from the correctness flags.
    pub fn recompute_multi_select(&mut self) {
        self.is_multi_select = self.correct_count() > 1;
    }

    /// Char length of the (first) correct option's text, if any.
    pub fn correct_len(&self) -> Option<usize> {
        self.options
            .iter()
            .find(|o| o.correct)
            .map(|o| text_len(&o.text))
    }
}

impl Corpus {
    /// Refresh every derived count in the metadata from the question lists.
    pub fn recompute_counts(&mut self) {
        for q in &mut self.mc_questions {
            q.recompute_multi_select();
        }

        let multi = self
            .mc_questions
            .iter()
            .filter(|q| q.is_multi_select)
            .count();

        let mut dist = DifficultyDistribution::default();
        for q in &self.mc_questions {
            match q.difficulty {
                Difficulty::Easy => dist.easy += 1,
                Difficulty::Medium => dist.medium += 1,
                Difficulty::Hard => dist.hard += 1,
            }
        }

        self.metadata.total_topics = self.topics.len();
        self.metadata.total_mc_questions = self.mc_questions.len();
        self.metadata.total_open_questions = self.open_questions.len();
        self.metadata.difficulty_distribution = dist;
        self.metadata.multi_select_questions = multi;
        self.metadata.single_choice_questions = self.mc_questions.len() - multi;
    }

    /// Derive the user-facing `sourceType`/`sourceLabel` pair from the
    /// originality flag, for MC and open questions alike. Idempotent.
    pub fn apply_source_labels(&mut self) -> usize {
        let mut labeled = 0;

        for q in &mut self.mc_questions {
            let source = if q.is_original {
                SourceType::Student
            } else {
                SourceType::Ai
            };
            if q.source_type != Some(source) {
                labeled += 1;
            }
            q.source_type = Some(source);
            q.source_label = Some(source.label().to_string());
        }

        for q in &mut self.open_questions {
            let source = if q.is_original {
                SourceType::Student
            } else {
                SourceType::Ai
            };
            if q.source_type != Some(source) {
                labeled += 1;
            }
            q.source_type = Some(source);
            q.source_label = Some(source.label().to_string());
        }

        labeled
    }

    /// Look up a topic by id.
    pub fn topic(&self, id: u32) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }
}
