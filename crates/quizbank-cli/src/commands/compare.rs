//! The `quizbank compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::report::AnalysisReport;

pub fn execute(baseline_path: PathBuf, current_path: PathBuf, format: String) -> Result<()> {
    let baseline = AnalysisReport::load_json(&baseline_path)?;
    let current = AnalysisReport::load_json(&current_path)?;

    let delta = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", delta.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&delta)?);
        }
        _ => {
            // text format
            println!(
                "Longest-is-correct ratio: {:.1}% -> {:.1}% ({:+.1}%)",
                delta.baseline_ratio * 100.0,
                delta.current_ratio * 100.0,
                delta.ratio_delta() * 100.0
            );
            println!(
                "MC questions: {} -> {}",
                delta.baseline_questions, delta.current_questions
            );
            if delta.improved() {
                println!("The question set got harder to game.");
            } else if delta.ratio_delta() > 0.0 {
                println!("The question set got easier to game.");
            } else {
                println!("No change in the length tell.");
            }
        }
    }

    Ok(())
}
