use anyhow::Context;
use sqlgate_settings::{Overrides, ResolvedConfig, SqlgateConfigV1};
use sqlgate_types::PolicySummary;

/// Parse and resolve `sqlgate.toml` text. Empty text means the default profile.
pub fn load_policy(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        SqlgateConfigV1::default()
    } else {
        sqlgate_settings::parse_config_toml(config_text).context("parse config")?
    };

    sqlgate_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// The effective policy in displayable form.
pub fn policy_summary(resolved: &ResolvedConfig) -> PolicySummary {
    let policy = &resolved.policy;
    PolicySummary {
        profile: resolved.profile.clone(),
        max_row_limit: policy.max_row_limit(),
        allowed_tables: policy.allowed_tables().map(str::to_string).collect(),
        forbidden_keywords: policy
            .forbidden_keywords()
            .iter()
            .map(|k| k.keyword().to_string())
            .collect(),
        injection_patterns: policy
            .injection_patterns()
            .iter()
            .map(|p| p.id().to_string())
            .collect(),
    }
}
