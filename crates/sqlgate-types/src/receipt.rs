use crate::Verdict;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for sqlgate reports.
pub const SCHEMA_REPORT_V1: &str = "sqlgate.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The policy a verdict was produced under (display only; patterns are omitted).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct PolicySummary {
    pub profile: String,
    pub max_row_limit: u64,
    pub allowed_tables: Vec<String>,
    pub forbidden_keywords: Vec<String>,
    pub injection_patterns: Vec<String>,
}

/// A report envelope around one gateway decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub policy: PolicySummary,
    /// The candidate exactly as submitted.
    pub input: String,
    pub verdict: Verdict,
}
