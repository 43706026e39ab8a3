use sqlgate_domain::policy::{
    DEFAULT_ALLOWED_TABLES, DEFAULT_FORBIDDEN_KEYWORDS, DEFAULT_INJECTION_PATTERNS,
    DEFAULT_MAX_ROW_LIMIT,
};

pub const DEFAULT_PROFILE: &str = "analytics";

/// Heuristics the `strict` profile adds on top of the analytics list.
const STRICT_EXTRA_PATTERNS: &[(&str, &str)] = &[
    ("union_select", r"(?i)\bUNION\s+(ALL\s+)?SELECT\b"),
    ("into_outfile", r"(?i)\bINTO\s+(OUT|DUMP)FILE\b"),
    ("sleep_call", r"(?i)\bSLEEP\s*\("),
    ("benchmark_call", r"(?i)\bBENCHMARK\s*\("),
    ("waitfor_delay", r"(?i)\bWAITFOR\s+DELAY\b"),
    ("pg_sleep_call", r"(?i)\bPG_SLEEP\s*\("),
];

/// An uncompiled policy; resolution layers config on top and then validates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub profile: String,
    pub allowed_tables: Vec<String>,
    pub forbidden_keywords: Vec<String>,
    /// `(id, pattern)` in evaluation order.
    pub injection_patterns: Vec<(String, String)>,
    pub max_row_limit: u64,
}

pub fn known_profiles() -> &'static [&'static str] {
    &["analytics", "strict"]
}

/// Preset profiles are opinionated defaults.
///
/// Unknown names fall back to `analytics`.
pub fn preset(profile: &str) -> Preset {
    match profile {
        "strict" => strict_profile(),
        _ => analytics_profile(),
    }
}

fn analytics_profile() -> Preset {
    Preset {
        profile: "analytics".to_string(),
        allowed_tables: to_strings(DEFAULT_ALLOWED_TABLES),
        forbidden_keywords: to_strings(DEFAULT_FORBIDDEN_KEYWORDS),
        injection_patterns: to_pairs(DEFAULT_INJECTION_PATTERNS),
        max_row_limit: DEFAULT_MAX_ROW_LIMIT,
    }
}

fn strict_profile() -> Preset {
    let mut injection_patterns = to_pairs(DEFAULT_INJECTION_PATTERNS);
    injection_patterns.extend(to_pairs(STRICT_EXTRA_PATTERNS));
    Preset {
        profile: "strict".to_string(),
        max_row_limit: 100,
        injection_patterns,
        ..analytics_profile()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(id, pattern)| (id.to_string(), pattern.to_string()))
        .collect()
}
