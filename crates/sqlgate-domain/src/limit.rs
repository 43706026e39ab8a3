//! Row-limit enforcement.
//!
//! Only a `LIMIT` at parenthesis depth 0 bounds the statement; a subquery's
//! LIMIT does not. The output always carries exactly one top-level limit no
//! greater than the ceiling, and enforcing twice changes nothing.
//!
//! Text that does not tokenize is treated as having no LIMIT and gets one
//! appended; the structural gate has already rejected such text.

use crate::lexer::{Token, TokenKind, tokenize};
use crate::policy::PolicyConfig;
use sqlgate_types::Advisory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimitOutcome {
    pub sql: String,
    pub advisory: Option<Advisory>,
}

/// Bound `normalized` by the policy's `max_row_limit`.
pub fn enforce_limit(normalized: &str, policy: &PolicyConfig) -> LimitOutcome {
    enforce_ceiling(normalized, policy.max_row_limit())
}

/// Like [`enforce_limit`], but with a caller-chosen page size that the
/// policy's `max_row_limit` still caps.
pub fn with_row_limit(normalized: &str, requested: u64, policy: &PolicyConfig) -> LimitOutcome {
    enforce_ceiling(normalized, requested.min(policy.max_row_limit()))
}

fn enforce_ceiling(text: &str, ceiling: u64) -> LimitOutcome {
    let body = strip_terminators(text);
    let tokens = tokenize(body).unwrap_or_default();

    let Some(limit_at) = tokens
        .iter()
        .rposition(|t| t.depth == 0 && t.is_word("LIMIT"))
    else {
        let sql = if body.is_empty() {
            format!("LIMIT {ceiling}")
        } else {
            format!("{body} LIMIT {ceiling}")
        };
        return LimitOutcome {
            sql,
            advisory: Some(Advisory::LimitInjected { limit: ceiling }),
        };
    };

    let value_end = tokens[limit_at + 1..]
        .iter()
        .position(ends_limit_value)
        .map(|p| limit_at + 1 + p)
        .unwrap_or(tokens.len());
    let value = &tokens[limit_at + 1..value_end];

    match value {
        [literal] if is_integer(literal) => {
            // Too many digits for u64 is still "more than the ceiling".
            let requested = literal.text.parse::<u64>().unwrap_or(u64::MAX);
            if requested <= ceiling {
                return LimitOutcome {
                    sql: body.to_string(),
                    advisory: None,
                };
            }
            LimitOutcome {
                sql: splice(body, literal.start, literal.end, ceiling),
                advisory: Some(Advisory::LimitClamped {
                    from: requested,
                    to: ceiling,
                }),
            }
        }
        // `LIMIT ALL`, `LIMIT NULL`, parameters and expressions do not bound
        // anything we can verify; the whole value is replaced.
        _ => {
            let sql = match (value.first(), value.last()) {
                (Some(first), Some(last)) => splice(body, first.start, last.end, ceiling),
                _ => {
                    let at = tokens[limit_at].end;
                    format!("{} {ceiling}{}", &body[..at], &body[at..])
                }
            };
            LimitOutcome {
                sql,
                advisory: Some(Advisory::LimitInjected { limit: ceiling }),
            }
        }
    }
}

fn ends_limit_value(token: &Token<'_>) -> bool {
    token.depth == 0
        && (token.is_word("OFFSET")
            || token.is_word("FETCH")
            || token.is_word("FOR")
            || token.is_punct(';'))
}

fn is_integer(token: &Token<'_>) -> bool {
    token.kind == TokenKind::Number && token.text.bytes().all(|b| b.is_ascii_digit())
}

fn splice(body: &str, start: usize, end: usize, ceiling: u64) -> String {
    format!("{}{ceiling}{}", &body[..start], &body[end..])
}

/// Drop trailing statement terminators; the canonical form has none.
fn strip_terminators(text: &str) -> &str {
    text.trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::policy_with;

    fn enforce(sql: &str) -> LimitOutcome {
        enforce_limit(sql, &policy_with(&["sessions"], &["DROP"], 1000))
    }

    #[test]
    fn injects_missing_limit() {
        let out = enforce("SELECT user_id FROM sessions");
        assert_eq!(out.sql, "SELECT user_id FROM sessions LIMIT 1000");
        assert_eq!(out.advisory, Some(Advisory::LimitInjected { limit: 1000 }));
    }

    #[test]
    fn strips_trailing_terminators_before_injecting() {
        let out = enforce("SELECT user_id FROM sessions ;;");
        assert_eq!(out.sql, "SELECT user_id FROM sessions LIMIT 1000");
    }

    #[test]
    fn keeps_limit_within_ceiling() {
        let out = enforce("SELECT * FROM sessions LIMIT 50 OFFSET 10");
        assert_eq!(out.sql, "SELECT * FROM sessions LIMIT 50 OFFSET 10");
        assert_eq!(out.advisory, None);

        let out = enforce("SELECT * FROM sessions limit 1000;");
        assert_eq!(out.sql, "SELECT * FROM sessions limit 1000");
        assert_eq!(out.advisory, None);
    }

    #[test]
    fn clamps_limit_above_ceiling() {
        let out = enforce("SELECT * FROM sessions LIMIT 5000 OFFSET 3");
        assert_eq!(out.sql, "SELECT * FROM sessions LIMIT 1000 OFFSET 3");
        assert_eq!(
            out.advisory,
            Some(Advisory::LimitClamped {
                from: 5000,
                to: 1000
            })
        );
    }

    #[test]
    fn clamps_values_too_large_for_u64() {
        let out = enforce("SELECT * FROM sessions LIMIT 99999999999999999999999");
        assert_eq!(out.sql, "SELECT * FROM sessions LIMIT 1000");
        assert_eq!(
            out.advisory,
            Some(Advisory::LimitClamped {
                from: u64::MAX,
                to: 1000
            })
        );
    }

    #[test]
    fn subquery_limit_does_not_bound_the_outer_query() {
        let out = enforce("SELECT * FROM (SELECT * FROM sessions LIMIT 10) s");
        assert_eq!(
            out.sql,
            "SELECT * FROM (SELECT * FROM sessions LIMIT 10) s LIMIT 1000"
        );
        assert_eq!(out.advisory, Some(Advisory::LimitInjected { limit: 1000 }));
    }

    #[test]
    fn non_literal_limits_are_replaced() {
        for (input, expected) in [
            ("SELECT * FROM sessions LIMIT ALL", "SELECT * FROM sessions LIMIT 1000"),
            ("SELECT * FROM sessions LIMIT $1", "SELECT * FROM sessions LIMIT 1000"),
            ("SELECT * FROM sessions LIMIT (10 * 1000) OFFSET 2", "SELECT * FROM sessions LIMIT 1000 OFFSET 2"),
            ("SELECT * FROM sessions LIMIT -1", "SELECT * FROM sessions LIMIT 1000"),
            ("SELECT * FROM sessions LIMIT", "SELECT * FROM sessions LIMIT 1000"),
            ("SELECT * FROM sessions LIMIT OFFSET 5", "SELECT * FROM sessions LIMIT 1000 OFFSET 5"),
        ] {
            let out = enforce(input);
            assert_eq!(out.sql, expected, "input: {input}");
            assert_eq!(out.advisory, Some(Advisory::LimitInjected { limit: 1000 }));
        }
    }

    #[test]
    fn limit_inside_identifier_is_not_a_limit_clause() {
        let out = enforce("SELECT limit_value FROM sessions");
        assert_eq!(out.sql, "SELECT limit_value FROM sessions LIMIT 1000");
    }

    #[test]
    fn requested_row_limit_is_capped_by_policy() {
        let policy = policy_with(&["sessions"], &["DROP"], 1000);

        let out = with_row_limit("SELECT id FROM sessions", 50, &policy);
        assert_eq!(out.sql, "SELECT id FROM sessions LIMIT 50");
        assert_eq!(out.advisory, Some(Advisory::LimitInjected { limit: 50 }));

        let out = with_row_limit("SELECT id FROM sessions LIMIT 200", 50_000, &policy);
        assert_eq!(out.sql, "SELECT id FROM sessions LIMIT 200");
        assert_eq!(out.advisory, None);

        let out = with_row_limit("SELECT id FROM sessions LIMIT 200", 20, &policy);
        assert_eq!(out.sql, "SELECT id FROM sessions LIMIT 20");
        assert_eq!(out.advisory, Some(Advisory::LimitClamped { from: 200, to: 20 }));
    }

    #[test]
    fn enforcing_twice_is_a_no_op() {
        for input in [
            "SELECT * FROM sessions",
            "SELECT * FROM sessions LIMIT 5000",
            "SELECT * FROM sessions LIMIT ALL;",
            "SELECT * FROM sessions LIMIT 3",
        ] {
            let once = enforce(input);
            let twice = enforce(&once.sql);
            assert_eq!(twice.sql, once.sql);
            assert_eq!(twice.advisory, None);
        }
    }
}
