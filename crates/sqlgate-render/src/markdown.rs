use crate::{RenderableItem, RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# sqlgate report\n\n");
    let verdict = match report.status {
        RenderableStatus::Accepted => "ACCEPTED",
        RenderableStatus::Rejected => "REJECTED",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: `{}` (max rows: {})\n- Violations: {} / Advisories: {}\n\n",
        verdict,
        report.policy.profile,
        report.policy.max_row_limit,
        report.violations.len(),
        report.advisories.len()
    ));

    let fence = if report.sql.contains("```") { "````" } else { "```" };
    out.push_str(&format!("{fence}sql\n{}\n{fence}\n\n", report.sql));

    if report.violations.is_empty() {
        out.push_str("No violations.\n");
    } else {
        out.push_str("## Violations\n\n");
        push_items(&mut out, &report.violations);
    }

    if !report.advisories.is_empty() {
        out.push_str("\n## Advisories\n\n");
        push_items(&mut out, &report.advisories);
    }

    out
}

fn push_items(out: &mut String, items: &[RenderableItem]) {
    for item in items {
        out.push_str(&format!("- `{}`: {}\n", item.code, item.message));
        if let Some(help) = &item.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }
}
