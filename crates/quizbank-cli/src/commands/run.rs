//! The `quizbank run` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizbank_core::config::load_config_from;
use quizbank_core::pipeline::run_pipeline;
use quizbank_core::report::PipelineReport;
use quizbank_core::store;
use quizbank_report::html::write_html_report;
use quizbank_report::markdown::write_markdown_report;

pub fn execute(
    corpus_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    report_dir: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut corpus = store::load_corpus(&corpus_path)?;

    eprintln!(
        "quizbank — sanitizing {} ({} MC questions)",
        corpus_path.display(),
        corpus.mc_questions.len()
    );

    let report = run_pipeline(&mut corpus, &config)?;

    let target = output.unwrap_or(corpus_path);
    store::save_corpus(&target, &corpus)?;
    eprintln!("Corpus saved to: {}", target.display());

    print_summary(&report);

    std::fs::create_dir_all(&report_dir)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown", "html"]
    } else {
        format.split(',').map(|s| s.trim()).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = report_dir.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "markdown" | "md" => {
                let path = report_dir.join(format!("report-{timestamp}.md"));
                write_markdown_report(&report, &path)?;
                eprintln!("Markdown report: {}", path.display());
            }
            "html" => {
                let path = report_dir.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &PipelineReport) {
    let mut table = Table::new();
    table.set_header(vec!["Stage", "Result"]);
    table.add_row(vec![
        Cell::new("Filter"),
        Cell::new(format!(
            "removed {}, {} remaining",
            report.filter.removed.len(),
            report.filter.remaining
        )),
    ]);
    table.add_row(vec![
        Cell::new("Rebalance"),
        Cell::new(format!(
            "{} pass(es), {} lengthened, ratio {:.1}% -> {:.1}%{}",
            report.rebalance.passes,
            report.rebalance.modifications,
            report.rebalance.initial_ratio * 100.0,
            report.rebalance.final_ratio * 100.0,
            if report.rebalance.converged {
                ""
            } else {
                " (budget exhausted)"
            }
        )),
    ]);
    table.add_row(vec![
        Cell::new("Enrich"),
        Cell::new(format!(
            "{} full block(s), {} marker line(s)",
            report.enrich.full_blocks, report.enrich.marker_lines
        )),
    ]);
    table.add_row(vec![
        Cell::new("Shuffle"),
        Cell::new(format!(
            "{} question(s), {} multi-select",
            report.shuffle.shuffled, report.shuffle.multi_select
        )),
    ]);

    eprintln!("\n{table}");
}
