//! Config parsing and profile/preset resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{KeywordsConfig, PatternConfig, SqlgateConfigV1, TablesConfig};
pub use presets::{DEFAULT_PROFILE, Preset, known_profiles, preset};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `sqlgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SqlgateConfigV1> {
    let cfg: SqlgateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy (profile + config + overrides).
pub fn resolve_config(cfg: SqlgateConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
