use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fatal policy failure. Collected, never thrown.
///
/// Serialized as an object whose `code` field is the stable tag from [`ids`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Violation {
    ForbiddenOperation { keyword: String },
    UnlistedTable { table: String },
    InjectionPattern { pattern_id: String },
    MultipleStatements,
    MissingSelect,
    MissingSource,
    MalformedInput,
    EmptyInput,
}

impl Violation {
    pub fn code(&self) -> &'static str {
        match self {
            Violation::ForbiddenOperation { .. } => ids::CODE_FORBIDDEN_OPERATION,
            Violation::UnlistedTable { .. } => ids::CODE_UNLISTED_TABLE,
            Violation::InjectionPattern { .. } => ids::CODE_INJECTION_PATTERN,
            Violation::MultipleStatements => ids::CODE_MULTIPLE_STATEMENTS,
            Violation::MissingSelect => ids::CODE_MISSING_SELECT,
            Violation::MissingSource => ids::CODE_MISSING_SOURCE,
            Violation::MalformedInput => ids::CODE_MALFORMED_INPUT,
            Violation::EmptyInput => ids::CODE_EMPTY_INPUT,
        }
    }

    /// Structural violations stop the pipeline before any scanning happens.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Violation::MissingSelect
                | Violation::MissingSource
                | Violation::MalformedInput
                | Violation::EmptyInput
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ForbiddenOperation { keyword } => {
                write!(f, "forbidden operation: {keyword}")
            }
            Violation::UnlistedTable { table } => write!(f, "table is not allowlisted: {table}"),
            Violation::InjectionPattern { pattern_id } => {
                write!(f, "suspicious pattern detected: {pattern_id}")
            }
            Violation::MultipleStatements => f.write_str("multiple SQL statements are not allowed"),
            Violation::MissingSelect => f.write_str("query must begin with SELECT"),
            Violation::MissingSource => f.write_str("query must contain a FROM clause"),
            Violation::MalformedInput => {
                f.write_str("query has an unterminated literal or comment, or unbalanced parentheses")
            }
            Violation::EmptyInput => f.write_str("query is empty"),
        }
    }
}

/// A non-blocking note about a rewrite or a stylistic concern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Advisory {
    LimitInjected { limit: u64 },
    LimitClamped { from: u64, to: u64 },
    WildcardProjection,
    NoFilterClause,
}

impl Advisory {
    pub fn code(&self) -> &'static str {
        match self {
            Advisory::LimitInjected { .. } => ids::CODE_LIMIT_INJECTED,
            Advisory::LimitClamped { .. } => ids::CODE_LIMIT_CLAMPED,
            Advisory::WildcardProjection => ids::CODE_WILDCARD_PROJECTION,
            Advisory::NoFilterClause => ids::CODE_NO_FILTER_CLAUSE,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LimitInjected { limit } => {
                write!(f, "no LIMIT given, added LIMIT {limit}")
            }
            Advisory::LimitClamped { from, to } => {
                write!(f, "LIMIT {from} exceeds the maximum, lowered to {to}")
            }
            Advisory::WildcardProjection => {
                f.write_str("SELECT * is discouraged, name the columns explicitly")
            }
            Advisory::NoFilterClause => {
                f.write_str("query has no WHERE or GROUP BY clause and may return many rows")
            }
        }
    }
}

/// The gateway's complete decision for one candidate.
///
/// `sql` always holds the best-effort canonical text, even when rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    pub accepted: bool,
    pub sql: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub advisories: Vec<Advisory>,
}

impl Verdict {
    /// Build a verdict; acceptance is derived from the violation list.
    pub fn new(sql: String, violations: Vec<Violation>, advisories: Vec<Advisory>) -> Self {
        Self {
            accepted: violations.is_empty(),
            sql,
            violations,
            advisories,
        }
    }

    pub fn violation_codes(&self) -> Vec<&'static str> {
        self.violations.iter().map(Violation::code).collect()
    }

    pub fn advisory_codes(&self) -> Vec<&'static str> {
        self.advisories.iter().map(Advisory::code).collect()
    }
}
