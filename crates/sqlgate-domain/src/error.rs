use sqlgate_types::Violation;

/// A `PolicyConfig` could not be constructed.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("max_row_limit must be greater than zero")]
    ZeroRowLimit,
    #[error("the table allowlist is empty")]
    EmptyAllowlist,
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),
    #[error("invalid forbidden keyword: {0:?} (expected a single word)")]
    InvalidKeyword(String),
    #[error("keyword {0} is required by every admitted query and cannot be forbidden")]
    ReservedKeyword(String),
    #[error("injection pattern id must not be empty")]
    EmptyPatternId,
    #[error("duplicate injection pattern id: {0}")]
    DuplicatePatternId(String),
    #[error("invalid injection pattern {id}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },
}

/// The tokenizer could not finish: a literal, quoted identifier or block
/// comment was left open.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot tokenize SQL: {0}")]
pub struct LexError(pub String);

/// Returned by `evaluate_strict` when the gateway rejects a candidate.
///
/// Carries the full violation list so callers can surface specifics without
/// re-running the check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsafe SQL rejected: {}", join_codes(.violations))]
pub struct PolicyViolation {
    pub violations: Vec<Violation>,
}

impl PolicyViolation {
    pub fn codes(&self) -> Vec<&'static str> {
        self.violations.iter().map(Violation::code).collect()
    }
}

fn join_codes(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::code)
        .collect::<Vec<_>>()
        .join(", ")
}
