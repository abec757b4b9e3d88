//! Markdown report generator.

use std::path::Path;

use anyhow::{Context, Result};

use quizbank_core::analyzer::BiasMetrics;
use quizbank_core::report::PipelineReport;

/// Render a pipeline report as markdown.
pub fn generate_markdown(report: &PipelineReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# quizbank run — {}\n\n", report.course));
    md.push_str(&format!(
        "{} | run `{}` | {} ms\n\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id,
        report.duration_ms
    ));

    md.push_str("## Bias\n\n");
    md.push_str(&format!(
        "**Longest-is-correct ratio:** {:.1}% -> {:.1}%{}\n\n",
        report.bias_before.longest_ratio() * 100.0,
        report.bias_after.longest_ratio() * 100.0,
        if report.rebalance.converged {
            ""
        } else {
            " (target not reached within the pass budget)"
        }
    ));
    md.push_str(&position_table(&report.bias_before, &report.bias_after));

    md.push_str("\n## Stages\n\n");
    md.push_str("| Stage | Result |\n|-------|--------|\n");
    md.push_str(&format!(
        "| Filter | removed {}, {} remaining |\n",
        report.filter.removed.len(),
        report.filter.remaining
    ));
    md.push_str(&format!(
        "| Rebalance | {} passes, {} options lengthened, final ratio {:.1}% |\n",
        report.rebalance.passes,
        report.rebalance.modifications,
        report.rebalance.final_ratio * 100.0
    ));
    md.push_str(&format!(
        "| Enrich | {} full blocks, {} marker lines |\n",
        report.enrich.full_blocks, report.enrich.marker_lines
    ));
    md.push_str(&format!(
        "| Shuffle | {} questions ({} multi-select, {} single-choice) |\n",
        report.shuffle.shuffled, report.shuffle.multi_select, report.shuffle.single_choice
    ));

    if !report.filter.removed.is_empty() {
        md.push_str("\n## Removed questions\n\n");
        md.push_str("| Id | Category | Stem |\n|----|----------|------|\n");
        for r in &report.filter.removed {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                r.id,
                r.category,
                r.stem.replace('|', "\\|")
            ));
        }
    }

    md
}

fn position_table(before: &BiasMetrics, after: &BiasMetrics) -> String {
    let mut md = String::new();
    md.push_str("| Position | Before (stored order) | After (shuffled) |\n");
    md.push_str("|----------|-----------------------|------------------|\n");
    let k = before.position_counts.len().max(after.position_counts.len());
    for pos in 0..k {
        let letter = (b'A' + pos as u8) as char;
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            letter,
            before.position_counts.get(pos).copied().unwrap_or(0),
            after.position_counts.get(pos).copied().unwrap_or(0)
        ));
    }
    md
}

/// Write the markdown report to a file.
pub fn write_markdown_report(report: &PipelineReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, generate_markdown(report))
        .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
    Ok(())
}
