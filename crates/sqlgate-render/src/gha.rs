use crate::RenderableReport;

/// Render violations and advisories as GitHub Actions workflow commands.
///
/// Violations become `::error::`, advisories `::notice::`.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let violations = report.violations.iter().map(|v| ("error", v));
    let advisories = report.advisories.iter().map(|a| ("notice", a));

    violations
        .chain(advisories)
        .map(|(level, item)| {
            let message = format!("[sqlgate:{}] {}", item.code, item.message)
                .replace('%', "%25")
                .replace('\r', "%0D")
                .replace('\n', "%0A");
            format!("::{}::{}", level, message)
        })
        .collect()
}
