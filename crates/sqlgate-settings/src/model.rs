use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `sqlgate.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional so an empty
/// file means "the default profile".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SqlgateConfigV1 {
    /// Optional schema string for tooling (`sqlgate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset to start from: `analytics` (default) or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Ceiling for the row-limit clause of every admitted query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_row_limit: Option<u64>,

    /// Injection pattern ids to remove from the preset list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disable_patterns: Vec<String>,

    #[serde(default)]
    pub tables: TablesConfig,

    #[serde(default)]
    pub keywords: KeywordsConfig,

    /// Extra heuristics, appended after the preset list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub injection_patterns: Vec<PatternConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TablesConfig {
    /// Replaces the preset allowlist when non-empty.
    #[serde(default)]
    pub allow: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordsConfig {
    /// Replaces the preset keyword list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbid: Option<Vec<String>>,

    /// Appended to the (preset or replaced) keyword list.
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatternConfig {
    pub id: String,
    /// Regular expression (Rust `regex` syntax) matched against normalized SQL.
    pub pattern: String,
}
