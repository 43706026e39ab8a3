use crate::policy::{InjectionPattern, PolicyConfig, default_injection_patterns};
use sqlgate_types::Violation;

pub fn analytics() -> PolicyConfig {
    PolicyConfig::analytics_default()
}

pub fn policy_with(tables: &[&str], keywords: &[&str], max_row_limit: u64) -> PolicyConfig {
    PolicyConfig::new(
        tables.iter().copied(),
        keywords.iter().copied(),
        default_injection_patterns(),
        max_row_limit,
    )
    .unwrap()
}

pub fn policy_with_patterns(patterns: &[(&str, &str)]) -> PolicyConfig {
    let patterns = patterns
        .iter()
        .map(|(id, p)| InjectionPattern::new(*id, p).unwrap())
        .collect();
    PolicyConfig::new(["sessions", "events"], ["DROP"], patterns, 1000).unwrap()
}

pub fn forbidden(keyword: &str) -> Violation {
    Violation::ForbiddenOperation {
        keyword: keyword.to_string(),
    }
}

pub fn unlisted(table: &str) -> Violation {
    Violation::UnlistedTable {
        table: table.to_string(),
    }
}

pub fn injection(id: &str) -> Violation {
    Violation::InjectionPattern {
        pattern_id: id.to_string(),
    }
}
