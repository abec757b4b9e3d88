//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizbank() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizbank").unwrap()
}

/// A small corpus: one length-skewed single-choice question, one
/// statistics question the filter should remove, one multi-select.
fn sample_corpus() -> String {
    let sixty = "the one correct answer, stated at proper length for the wins";
    assert_eq!(sixty.chars().count(), 60);
    format!(
        r#"{{
    "metadata": {{
        "course": "Test Course",
        "totalMcQuestions": 3,
        "totalOpenQuestions": 0
    }},
    "topics": [{{
        "id": 1,
        "name": "Psychological Safety",
        "keyConcepts": ["Humble Leadership"],
        "focus": "Safety means interpersonal risk without punishment."
    }}],
    "mcQuestions": [
        {{
            "id": "q1",
            "stem": "A conceptual question?",
            "explanation": "Short explanation.",
            "topicId": 1,
            "isOriginal": true,
            "options": [
                {{ "text": "ten chars.", "correct": false }},
                {{ "text": "twelve chars", "correct": false }},
                {{ "text": "{sixty}", "correct": true }}
            ]
        }},
        {{
            "id": "q2",
            "stem": "What was Cronbachs Alpha in Study 2?",
            "topicId": 1,
            "options": [
                {{ "text": "0.7", "correct": false }},
                {{ "text": "0.8", "correct": true }}
            ]
        }},
        {{
            "id": "q3",
            "stem": "Pick all that apply.",
            "topicId": 1,
            "options": [
                {{ "text": "one", "correct": true }},
                {{ "text": "two", "correct": true }},
                {{ "text": "three", "correct": false }}
            ]
        }}
    ],
    "openQuestions": []
}}"#
    )
}

fn write_corpus(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("questions.json");
    std::fs::write(&path, sample_corpus()).unwrap();
    path
}

#[test]
fn help_output() {
    quizbank()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exam question bank sanitizer"));
}

#[test]
fn version_output() {
    quizbank()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizbank"));
}

#[test]
fn validate_reports_counts() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);

    quizbank()
        .arg("validate")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 MC"));
}

#[test]
fn validate_nonexistent_file() {
    quizbank()
        .arg("validate")
        .arg("--corpus")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_rejects_question_without_correct_option() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"metadata": {}, "mcQuestions": [{
            "id": "q1", "stem": "Broken", "options": [
                {"text": "a", "correct": false},
                {"text": "b", "correct": false}]}]}"#,
    )
    .unwrap();

    quizbank()
        .arg("validate")
        .arg("--corpus")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no correct option"));
}

#[test]
fn analyze_prints_the_bias_ratio() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);

    quizbank()
        .arg("analyze")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Longest-is-correct"))
        .stdout(predicate::str::contains("multi-select: 1"));
}

#[test]
fn filter_removes_the_statistics_question() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);

    quizbank()
        .arg("filter")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 question(s)"))
        .stdout(predicate::str::contains("q2"));

    let content = std::fs::read_to_string(&corpus).unwrap();
    assert!(!content.contains("Cronbachs Alpha"));
    assert!(content.contains("\"totalMcQuestions\": 2"));
}

#[test]
fn filter_dry_run_leaves_the_file_alone() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);
    let before = std::fs::read_to_string(&corpus).unwrap();

    quizbank()
        .arg("filter")
        .arg("--corpus")
        .arg(&corpus)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would remove 1"));

    assert_eq!(std::fs::read_to_string(&corpus).unwrap(), before);
}

#[test]
fn rebalance_is_idempotent_across_invocations() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);

    quizbank()
        .arg("rebalance")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rebalanced"));

    let after_first = std::fs::read_to_string(&corpus).unwrap();

    quizbank()
        .arg("rebalance")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 option(s) lengthened"));

    assert_eq!(std::fs::read_to_string(&corpus).unwrap(), after_first);
}

#[test]
fn strip_restores_pre_marker_option_texts() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);

    quizbank()
        .arg("rebalance")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success();

    quizbank()
        .arg("strip")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stripped"));

    let content = std::fs::read_to_string(&corpus).unwrap();
    assert!(content.contains("ten chars."));
    assert!(content.contains("twelve chars"));
}

#[test]
fn shuffle_with_fixed_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);
    let out_a = dir.path().join("a.json");
    let out_b = dir.path().join("b.json");

    for out in [&out_a, &out_b] {
        quizbank()
            .arg("shuffle")
            .arg("--corpus")
            .arg(&corpus)
            .arg("--output")
            .arg(out)
            .arg("--seed")
            .arg("42")
            .assert()
            .success();
    }

    assert_eq!(
        std::fs::read(&out_a).unwrap(),
        std::fs::read(&out_b).unwrap()
    );
}

#[test]
fn enrich_adds_topic_takeaways() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);

    quizbank()
        .arg("enrich")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enriched"));

    let content = std::fs::read_to_string(&corpus).unwrap();
    assert!(content.contains("Key takeaway:"));
}

#[test]
fn run_executes_the_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);
    let report_dir = dir.path().join("reports");

    quizbank()
        .arg("run")
        .arg("--corpus")
        .arg(&corpus)
        .arg("--report-dir")
        .arg(&report_dir)
        .arg("--format")
        .arg("all")
        .assert()
        .success()
        .stderr(predicate::str::contains("Corpus saved to"));

    let content = std::fs::read_to_string(&corpus).unwrap();
    assert!(!content.contains("Cronbachs Alpha"));
    assert!(content.contains("sourceType"));

    let reports: Vec<_> = std::fs::read_dir(&report_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(reports.len(), 3);
}

#[test]
fn compare_two_analysis_snapshots() {
    let dir = TempDir::new().unwrap();
    let corpus = write_corpus(&dir);
    let baseline = dir.path().join("baseline.json");
    let current = dir.path().join("current.json");

    quizbank()
        .arg("analyze")
        .arg("--corpus")
        .arg(&corpus)
        .arg("--report")
        .arg(&baseline)
        .assert()
        .success();

    quizbank()
        .arg("rebalance")
        .arg("--corpus")
        .arg(&corpus)
        .assert()
        .success();

    quizbank()
        .arg("analyze")
        .arg("--corpus")
        .arg(&corpus)
        .arg("--report")
        .arg(&current)
        .assert()
        .success();

    quizbank()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("harder to game"));
}

#[test]
fn compare_nonexistent_report() {
    quizbank()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn combine_builds_a_corpus_from_topic_files() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(
        data_dir.join("topic_01_safety.json"),
        r#"{
            "topic": {"id": 1, "name": "Safety", "focus": "Risk without punishment."},
            "questions": {
                "mc_existing": [{
                    "id": "t1-1",
                    "stem": "What does safety enable?",
                    "options": [
                        {"text": "Learning", "correct": true},
                        {"text": "Nothing", "correct": false}
                    ]
                }]
            }
        }"#,
    )
    .unwrap();
    let output = dir.path().join("questions.json");

    quizbank()
        .arg("combine")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--output")
        .arg(&output)
        .arg("--course")
        .arg("Test Course")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total MC questions: 1"));

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"topicName\": \"Safety\""));
    assert!(content.contains("\"isOriginal\": true"));
}

#[test]
fn combine_fails_on_empty_directory() {
    let dir = TempDir::new().unwrap();

    quizbank()
        .arg("combine")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no topic_"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizbank()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizbank.toml"))
        .stdout(predicate::str::contains("Created data/topic_01_example.json"));

    assert!(dir.path().join("quizbank.toml").exists());
    assert!(dir.path().join("data/topic_01_example.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    quizbank().current_dir(dir.path()).arg("init").assert().success();

    // Second init should skip
    quizbank()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
