//! The `quizbank combine` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::{assemble, store};

pub fn execute(
    data_dir: PathBuf,
    output: PathBuf,
    course: String,
    exam_date: Option<String>,
) -> Result<()> {
    let parsed = assemble::load_topic_directory(&data_dir)?;
    anyhow::ensure!(
        !parsed.is_empty(),
        "no topic_*.json files found in {}",
        data_dir.display()
    );

    println!("Loaded {} topic file(s)", parsed.len());

    let corpus = assemble::combine(parsed, &course, exam_date.as_deref());
    store::validate_corpus(&corpus)?;
    store::save_corpus(&output, &corpus)?;

    println!("Created: {}", output.display());
    println!("Total MC questions: {}", corpus.metadata.total_mc_questions);
    println!(
        "Total open questions: {}",
        corpus.metadata.total_open_questions
    );
    let dist = corpus.metadata.difficulty_distribution;
    println!(
        "Difficulty: easy {} / medium {} / hard {}",
        dist.easy, dist.medium, dist.hard
    );

    Ok(())
}
