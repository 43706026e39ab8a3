//! The `explain` use case: look up documentation for a violation or advisory tag.

use sqlgate_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the tag.
    Found(Explanation),
    /// Unknown tag; includes every known tag.
    NotFound {
        identifier: String,
        violation_codes: &'static [&'static str],
        advisory_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            violation_codes: explain::all_violation_codes(),
            advisory_codes: explain::all_advisory_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before:\n");
    out.push_str("```sql\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After:\n");
    out.push_str("```sql\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

pub fn format_not_found(
    identifier: &str,
    violation_codes: &[&'static str],
    advisory_codes: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown code: {}\n\n", identifier));
    out.push_str("Violations:\n");
    for code in violation_codes {
        out.push_str(&format!("  - {}\n", code));
    }
    out.push_str("\nAdvisories:\n");
    for code in advisory_codes {
        out.push_str(&format!("  - {}\n", code));
    }

    out
}
