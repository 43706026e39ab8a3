//! The `check` use case: resolve policy, evaluate one candidate, produce a report.

use sqlgate_domain::{ApprovedSql, PolicyConfig, PolicyViolation};
use sqlgate_settings::{Overrides, ResolvedConfig};
use sqlgate_types::{GateReport, SCHEMA_REPORT_V1, ToolMeta, Verdict};
use time::OffsetDateTime;

use crate::policy::{load_policy, policy_summary};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Candidate SQL exactly as received.
    pub sql: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: GateReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = load_policy(input.config_text, input.overrides.clone())?;
    let verdict = sqlgate_domain::evaluate(input.sql, &resolved.policy);
    log_verdict(&resolved.profile, &verdict);

    let finished_at = OffsetDateTime::now_utc();

    let report = GateReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "sqlgate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        policy: policy_summary(&resolved),
        input: input.sql.to_string(),
        verdict,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Strict evaluation for call sites that execute the result directly.
///
/// Advisories do not block, but they are logged so rewrites are visible.
pub fn ensure_safe_sql(sql: &str, policy: &PolicyConfig) -> Result<ApprovedSql, PolicyViolation> {
    match sqlgate_domain::evaluate_strict(sql, policy) {
        Ok(approved) => {
            for advisory in approved.advisories() {
                tracing::warn!(code = advisory.code(), "{advisory}");
            }
            Ok(approved)
        }
        Err(rejected) => {
            tracing::warn!(codes = ?rejected.codes(), "{rejected}");
            Err(rejected)
        }
    }
}

/// Map verdict to exit code: 0 = accepted, 2 = rejected.
pub fn verdict_exit_code(verdict: &Verdict) -> i32 {
    if verdict.accepted { 0 } else { 2 }
}

fn log_verdict(profile: &str, verdict: &Verdict) {
    for violation in &verdict.violations {
        tracing::warn!(profile, code = violation.code(), "{violation}");
    }
    for advisory in &verdict.advisories {
        tracing::debug!(profile, code = advisory.code(), "{advisory}");
    }
    if verdict.accepted {
        tracing::info!(profile, sql = %verdict.sql, "query accepted");
    }
}
