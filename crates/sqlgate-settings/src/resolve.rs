use crate::{model::SqlgateConfigV1, presets};
use anyhow::Context;
use sqlgate_domain::{InjectionPattern, PolicyConfig};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_row_limit: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    /// Name of the preset the policy was built from.
    pub profile: String,
    pub policy: PolicyConfig,
}

pub fn resolve_config(cfg: SqlgateConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let mut preset = presets::preset(&profile);

    if !cfg.tables.allow.is_empty() {
        preset.allowed_tables = cfg.tables.allow.clone();
    }

    if let Some(forbid) = &cfg.keywords.forbid {
        preset.forbidden_keywords = forbid.clone();
    }
    preset
        .forbidden_keywords
        .extend(cfg.keywords.extra.iter().cloned());

    for id in &cfg.disable_patterns {
        let before = preset.injection_patterns.len();
        preset.injection_patterns.retain(|(existing, _)| existing != id);
        if preset.injection_patterns.len() == before {
            anyhow::bail!(
                "disable_patterns names unknown injection pattern: {id} (profile {})",
                preset.profile
            );
        }
    }
    preset.injection_patterns.extend(
        cfg.injection_patterns
            .iter()
            .map(|p| (p.id.clone(), p.pattern.clone())),
    );

    let patterns = preset
        .injection_patterns
        .iter()
        .map(|(id, pattern)| {
            InjectionPattern::new(id.as_str(), pattern)
                .with_context(|| format!("invalid injection pattern {id}: {pattern}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let max_row_limit = overrides
        .max_row_limit
        .or(cfg.max_row_limit)
        .unwrap_or(preset.max_row_limit);

    let policy = PolicyConfig::new(
        &preset.allowed_tables,
        &preset.forbidden_keywords,
        patterns,
        max_row_limit,
    )
    .context("invalid policy configuration")?;

    Ok(ResolvedConfig {
        profile: preset.profile,
        policy,
    })
}
