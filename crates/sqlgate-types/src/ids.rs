//! Stable tags for violations and advisories.
//!
//! These strings are part of the reporting contract: logs, telemetry and
//! client-facing error lists match on them, never on message prose.

// Violations: structural (fatal, short-circuit)
pub const CODE_EMPTY_INPUT: &str = "empty_input";
pub const CODE_MISSING_SELECT: &str = "missing_select";
pub const CODE_MISSING_SOURCE: &str = "missing_source";
pub const CODE_MALFORMED_INPUT: &str = "malformed_input";

// Violations: policy (fatal, accumulated)
pub const CODE_FORBIDDEN_OPERATION: &str = "forbidden_operation";
pub const CODE_INJECTION_PATTERN: &str = "injection_pattern";
pub const CODE_UNLISTED_TABLE: &str = "unlisted_table";
pub const CODE_MULTIPLE_STATEMENTS: &str = "multiple_statements";

// Advisories (never fatal)
pub const CODE_LIMIT_INJECTED: &str = "limit_injected";
pub const CODE_LIMIT_CLAMPED: &str = "limit_clamped";
pub const CODE_WILDCARD_PROJECTION: &str = "wildcard_projection";
pub const CODE_NO_FILTER_CLAUSE: &str = "no_filter_clause";

// Tool-level
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
