//! The `quizbank analyze` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizbank_core::analyzer;
use quizbank_core::report::AnalysisReport;
use quizbank_core::store;

pub fn execute(corpus_path: PathBuf, report_path: Option<PathBuf>) -> Result<()> {
    let corpus = store::load_corpus(&corpus_path)?;
    let metrics = analyzer::analyze(&corpus);

    println!(
        "Analyzing {} (stored option order)",
        corpus_path.display()
    );
    println!(
        "Single-choice: {} | multi-select: {}",
        metrics.single_choice, metrics.multi_select
    );
    println!(
        "Longest-is-correct: {}/{} ({:.1}%)",
        metrics.longest_is_correct,
        metrics.single_choice,
        metrics.longest_ratio() * 100.0
    );

    let mut table = Table::new();
    table.set_header(vec!["Position", "Correct answers", "Share"]);
    for (pos, &count) in metrics.position_counts.iter().enumerate() {
        let letter = (b'A' + pos as u8) as char;
        table.add_row(vec![
            Cell::new(letter),
            Cell::new(count),
            Cell::new(format!("{:.1}%", metrics.position_share(pos) * 100.0)),
        ]);
    }
    println!("{table}");

    if let Some(path) = report_path {
        let report = AnalysisReport::new(&corpus, metrics);
        report.save_json(&path)?;
        println!("Analysis snapshot saved to: {}", path.display());
    }

    Ok(())
}
