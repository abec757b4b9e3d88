//! Relevance filtering of out-of-scope questions.
//!
//! Classifies each question's stem against an ordered rule table of regex
//! patterns; a question matching any rule is removed outright and logged
//! with the category of the first matching rule. Option text is never
//! inspected. The rule table is configuration data, not code — it is the
//! system's actual policy surface.

use anyhow::{Context, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::Corpus;

/// One filter rule: a case-insensitive pattern and the category it reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceRule {
    pub pattern: String,
    pub category: String,
}

impl RelevanceRule {
    pub fn new(pattern: &str, category: &str) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }
}

/// The built-in rule table: questions about study mechanics rather than
/// course content. Exams test concepts, not the papers' methodology.
pub fn default_rules() -> Vec<RelevanceRule> {
    vec![
        RelevanceRule::new(r"which method", "methodology"),
        RelevanceRule::new(r"study design", "methodology"),
        RelevanceRule::new(r"laboratory experiment", "methodology"),
        RelevanceRule::new(r"online survey", "methodology"),
        RelevanceRule::new(r"questionnaire", "methodology"),
        RelevanceRule::new(r"likert", "methodology"),
        RelevanceRule::new(r"mturk", "methodology"),
        RelevanceRule::new(r"how many participants", "sample_size"),
        RelevanceRule::new(r"sample size", "sample_size"),
        RelevanceRule::new(r"cronbach", "statistics"),
        RelevanceRule::new(r"effect size", "statistics"),
        RelevanceRule::new(r"significance", "statistics"),
        RelevanceRule::new(r"p-value", "statistics"),
        RelevanceRule::new(r"correlation r\s*=", "statistics"),
        RelevanceRule::new(r"in study \d", "study_detail"),
    ]
}

/// A question the filter removed (or would remove, on a dry run).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedQuestion {
    pub id: String,
    /// Category of the first matching rule, in rule order.
    pub category: String,
    /// Stem preview for the removal log.
    pub stem: String,
}

/// Summary of one filter application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub removed: Vec<RemovedQuestion>,
    pub remaining: usize,
}

struct CompiledRule {
    regex: regex::Regex,
    category: String,
}

fn compile(rules: &[RelevanceRule]) -> Result<Vec<CompiledRule>> {
    rules
        .iter()
        .map(|r| {
            let regex = RegexBuilder::new(&r.pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("invalid filter pattern: {}", r.pattern))?;
            Ok(CompiledRule {
                regex,
                category: r.category.clone(),
            })
        })
        .collect()
}

fn first_match(compiled: &[CompiledRule], stem: &str) -> Option<String> {
    compiled
        .iter()
        .find(|rule| rule.regex.is_match(stem))
        .map(|rule| rule.category.clone())
}

/// Classify without mutating — the dry-run used by `--dry-run` callers.
pub fn classify(corpus: &Corpus, rules: &[RelevanceRule]) -> Result<Vec<RemovedQuestion>> {
    let compiled = compile(rules)?;

    Ok(corpus
        .mc_questions
        .iter()
        .filter_map(|q| {
            first_match(&compiled, &q.stem).map(|category| RemovedQuestion {
                id: q.id.clone(),
                category,
                stem: preview(&q.stem),
            })
        })
        .collect())
}

/// Remove every matching question and recompute the corpus counts.
pub fn apply_filter(corpus: &mut Corpus, rules: &[RelevanceRule]) -> Result<FilterOutcome> {
    let compiled = compile(rules)?;
    let mut removed = Vec::new();

    corpus.mc_questions.retain(|q| {
        match first_match(&compiled, &q.stem) {
            Some(category) => {
                info!(question = %q.id, category = %category, "removing out-of-scope question");
                removed.push(RemovedQuestion {
                    id: q.id.clone(),
                    category,
                    stem: preview(&q.stem),
                });
                false
            }
            None => true,
        }
    });

    corpus.recompute_counts();
    let total_removed =
        corpus.metadata.removed_questions.unwrap_or(0) + removed.len();
    corpus.metadata.removed_questions = Some(total_removed);

    Ok(FilterOutcome {
        remaining: corpus.mc_questions.len(),
        removed,
    })
}

fn preview(stem: &str) -> String {
    if stem.chars().count() > 80 {
        let truncated: String = stem.chars().take(80).collect();
        format!("{truncated}...")
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, McQuestion, Metadata};

    fn question(id: &str, stem: &str) -> McQuestion {
        McQuestion {
            id: id.into(),
            stem: stem.into(),
            options: vec![
                AnswerOption {
                    text: "a".into(),
                    correct: true,
                },
                AnswerOption {
                    text: "b".into(),
                    correct: false,
                },
            ],
            is_multi_select: false,
            explanation: String::new(),
            topic_id: 1,
            topic_name: String::new(),
            question_type: "mc".into(),
            difficulty: Default::default(),
            is_original: true,
            source_type: None,
            source_label: None,
        }
    }

    fn corpus(questions: Vec<McQuestion>) -> Corpus {
        let mut c = Corpus {
            metadata: Metadata::default(),
            topics: vec![],
            mc_questions: questions,
            open_questions: vec![],
        };
        c.recompute_counts();
        c
    }

    #[test]
    fn removes_question_mentioning_cronbachs_alpha() {
        let mut c = corpus(vec![
            question("q1", "Was war Cronbachs Alpha in der zweiten Studie?"),
            question("q2", "What does psychological safety enable in teams?"),
        ]);
        assert_eq!(c.metadata.total_mc_questions, 2);

        let outcome = apply_filter(&mut c, &default_rules()).unwrap();

        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(outcome.removed[0].id, "q1");
        assert_eq!(outcome.removed[0].category, "statistics");
        assert_eq!(c.mc_questions.len(), 1);
        assert_eq!(c.metadata.total_mc_questions, 1);
        assert_eq!(c.metadata.removed_questions, Some(1));
    }

    #[test]
    fn category_comes_from_first_matching_rule() {
        // Matches both "study design" (methodology) and "sample size"
        // (sample_size); methodology comes first in rule order.
        let mut c = corpus(vec![question(
            "q1",
            "Which study design and sample size did the authors use?",
        )]);
        let outcome = apply_filter(&mut c, &default_rules()).unwrap();
        assert_eq!(outcome.removed[0].category, "methodology");
    }

    #[test]
    fn rule_order_does_not_change_what_is_removed() {
        let stems = vec![
            question("q1", "Which study design and sample size did the authors use?"),
            question("q2", "Define power in the approach-inhibition model."),
        ];
        let mut forward = corpus(stems.clone());
        let mut reversed_rules = default_rules();
        reversed_rules.reverse();
        let mut backward = corpus(stems);

        let a = apply_filter(&mut forward, &default_rules()).unwrap();
        let b = apply_filter(&mut backward, &reversed_rules).unwrap();

        let ids =
            |o: &FilterOutcome| o.removed.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn option_text_is_never_inspected() {
        let mut q = question("q1", "A perfectly fine conceptual stem");
        q.options[1].text = "the p-value was below the significance threshold".into();
        let mut c = corpus(vec![q]);

        let outcome = apply_filter(&mut c, &default_rules()).unwrap();
        assert!(outcome.removed.is_empty());
        assert_eq!(c.mc_questions.len(), 1);
    }

    #[test]
    fn classify_is_a_dry_run() {
        let c = corpus(vec![question("q1", "What sample size was used in Study 2?")]);
        let hits = classify(&c, &default_rules()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(c.mc_questions.len(), 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut c = corpus(vec![question("q1", "Describe the LIKERT scale used")]);
        let outcome = apply_filter(&mut c, &default_rules()).unwrap();
        assert_eq!(outcome.removed.len(), 1);
    }

    #[test]
    fn invalid_pattern_is_a_hard_error() {
        let rules = vec![RelevanceRule::new("(unclosed", "broken")];
        let c = corpus(vec![question("q1", "anything")]);
        assert!(classify(&c, &rules).is_err());
    }

    #[test]
    fn no_match_is_a_noop() {
        let mut c = corpus(vec![question("q1", "Define transformational leadership.")]);
        let before = serde_json::to_string(&c).unwrap();
        let outcome = apply_filter(&mut c, &default_rules()).unwrap();
        assert!(outcome.removed.is_empty());
        // removed_questions gets stamped to Some(0); everything else intact.
        c.metadata.removed_questions = None;
        assert_eq!(serde_json::to_string(&c).unwrap(), before);
    }
}
