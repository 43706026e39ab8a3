//! Render use cases: markdown, GitHub annotations and plain text from in-memory reports.

use crate::report::to_renderable;
use sqlgate_types::GateReport;

pub fn render_markdown(report: &GateReport) -> String {
    sqlgate_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &GateReport, max: usize) -> Vec<String> {
    sqlgate_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}

/// Terse terminal output: status line, the SQL, then one line per tag.
pub fn render_text(report: &GateReport) -> String {
    let verdict = &report.verdict;
    let mut out = String::new();

    out.push_str(if verdict.accepted { "ACCEPTED\n" } else { "REJECTED\n" });
    out.push_str(&verdict.sql);
    out.push('\n');
    for violation in &verdict.violations {
        out.push_str(&format!("violation {}: {}\n", violation.code(), violation));
    }
    for advisory in &verdict.advisories {
        out.push_str(&format!("advisory {}: {}\n", advisory.code(), advisory));
    }

    out
}
