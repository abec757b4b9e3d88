//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};

use quizbank_core::analyzer::BiasMetrics;
use quizbank_core::report::PipelineReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a pipeline report.
pub fn generate_html(report: &PipelineReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizbank report — {}</title>\n",
        html_escape(&report.course)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>quizbank report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Course: <strong>{}</strong> | {} MC questions | {}</p>\n",
        html_escape(&report.course),
        report.shuffle.shuffled,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Bias dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Bias</h2>\n");
    html.push_str(&format!(
        "<p>Longest-is-correct ratio: <strong>{:.1}%</strong> → <strong>{:.1}%</strong>{}</p>\n",
        report.bias_before.longest_ratio() * 100.0,
        report.bias_after.longest_ratio() * 100.0,
        if report.rebalance.converged {
            ""
        } else {
            " <em>(target not reached within the pass budget)</em>"
        }
    ));
    html.push_str(&position_chart(&report.bias_after));
    html.push_str("</section>\n");

    // Stage table
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Stages</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Stage</th><th>Result</th></tr></thead>\n<tbody>\n");
    html.push_str(&format!(
        "<tr><td>Filter</td><td>removed {}, {} remaining</td></tr>\n",
        report.filter.removed.len(),
        report.filter.remaining
    ));
    html.push_str(&format!(
        "<tr><td>Rebalance</td><td>{} passes, {} options lengthened, final ratio {:.1}%</td></tr>\n",
        report.rebalance.passes,
        report.rebalance.modifications,
        report.rebalance.final_ratio * 100.0
    ));
    html.push_str(&format!(
        "<tr><td>Enrich</td><td>{} full blocks, {} marker lines</td></tr>\n",
        report.enrich.full_blocks, report.enrich.marker_lines
    ));
    html.push_str(&format!(
        "<tr><td>Shuffle</td><td>{} questions ({} multi-select)</td></tr>\n",
        report.shuffle.shuffled, report.shuffle.multi_select
    ));
    html.push_str("</tbody></table>\n");

    // Removed questions
    if !report.filter.removed.is_empty() {
        html.push_str("<h2>Removed questions</h2>\n");
        html.push_str("<table class=\"removed\">\n");
        html.push_str("<thead><tr><th>Id</th><th>Category</th><th>Stem</th></tr></thead>\n<tbody>\n");
        for r in &report.filter.removed {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&r.id),
                html_escape(&r.category),
                html_escape(&r.stem)
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    html.push_str("</section>\n</body>\n</html>\n");
    html
}

/// SVG bar chart of the correct-answer position distribution.
fn position_chart(metrics: &BiasMetrics) -> String {
    let max = metrics.position_counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return String::new();
    }

    let bar_width = 60;
    let gap = 20;
    let height = 160;
    let width = metrics.position_counts.len() * (bar_width + gap) + gap;

    let mut svg = format!(
        "<svg class=\"chart\" viewBox=\"0 0 {width} {total}\" role=\"img\" \
         aria-label=\"Correct answer position distribution\">\n",
        total = height + 30
    );

    for (i, &count) in metrics.position_counts.iter().enumerate() {
        let bar_height = (count as f64 / max as f64 * height as f64).round() as usize;
        let x = gap + i * (bar_width + gap);
        let y = height - bar_height;
        let letter = (b'A' + i as u8) as char;
        svg.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{bar_width}\" height=\"{bar_height}\"/>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{letter}: {count}</text>\n",
            x + bar_width / 2,
            height + 20
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the HTML report to a file.
pub fn write_html_report(report: &PipelineReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, generate_html(report))
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
       margin: 0 auto; max-width: 880px; padding: 24px; color: #1a1a1a; }
header { border-bottom: 2px solid #e0e0e0; margin-bottom: 24px; }
h1 { margin-bottom: 4px; }
.meta { color: #666; }
table { border-collapse: collapse; width: 100%; margin: 12px 0; }
th, td { border: 1px solid #ddd; padding: 8px 12px; text-align: left; }
th { background: #f5f5f5; }
.chart { max-width: 480px; display: block; margin: 16px 0; }
.chart rect { fill: #4a7ab5; }
.chart text { font-size: 13px; fill: #444; }
em { color: #a05a00; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_report;

    #[test]
    fn html_is_self_contained() {
        let html = generate_html(&sample_report());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("quizbank report"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn stems_are_escaped() {
        let mut report = sample_report();
        report.filter.removed[0].stem = "<script>alert(1)</script>".into();
        let html = generate_html(&report);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        write_html_report(&sample_report(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn empty_position_counts_skip_the_chart() {
        let mut report = sample_report();
        report.bias_after.position_counts = vec![];
        let html = generate_html(&report);
        assert!(!html.contains("<svg"));
    }
}
