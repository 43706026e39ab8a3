use anyhow::Context;
use sqlgate_render::{RenderableItem, RenderablePolicy, RenderableReport, RenderableStatus};
use sqlgate_types::{GateReport, SCHEMA_REPORT_V1, lookup_explanation};

pub fn parse_report_json(text: &str) -> anyhow::Result<GateReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse sqlgate report")
}

pub fn serialize_report(report: &GateReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Flatten a report for the renderers. Violations carry remediation text as help.
pub fn to_renderable(report: &GateReport) -> RenderableReport {
    let verdict = &report.verdict;
    RenderableReport {
        status: if verdict.accepted {
            RenderableStatus::Accepted
        } else {
            RenderableStatus::Rejected
        },
        sql: verdict.sql.clone(),
        policy: RenderablePolicy {
            profile: report.policy.profile.clone(),
            max_row_limit: report.policy.max_row_limit,
        },
        violations: verdict
            .violations
            .iter()
            .map(|v| RenderableItem {
                code: v.code().to_string(),
                message: v.to_string(),
                help: lookup_explanation(v.code()).map(|e| e.remediation.to_string()),
            })
            .collect(),
        advisories: verdict
            .advisories
            .iter()
            .map(|a| RenderableItem {
                code: a.code().to_string(),
                message: a.to_string(),
                help: None,
            })
            .collect(),
    }
}
