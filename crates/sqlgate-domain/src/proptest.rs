//! Property-based tests for the gateway.
//!
//! These tests use proptest to verify invariants around:
//! - the structural gate short-circuiting
//! - whole-word keyword matching
//! - table allowlist completeness
//! - limit idempotence and clamping
//! - multi-statement rejection
//! - literal boundaries (escape strings, dollar quotes) never hiding a
//!   table or the final LIMIT, judged by raw-text regexes
//! - arbitrary input never panicking

use crate::engine::evaluate;
use crate::lexer::tokenize;
use crate::limit::enforce_limit;
use crate::policy::{DEFAULT_FORBIDDEN_KEYWORDS, PolicyConfig};
use crate::test_support::{analytics, forbidden, policy_with, unlisted};
use proptest::prelude::*;
use regex::Regex;
use sqlgate_types::Violation;

// ============================================================================
// Strategies
// ============================================================================

/// A leading word that is neither SELECT nor a forbidden keyword.
fn arb_non_select_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z]{1,10}")
        .unwrap()
        .prop_filter("must not be SELECT or forbidden", |w| {
            let upper = w.to_ascii_uppercase();
            upper != "SELECT" && !DEFAULT_FORBIDDEN_KEYWORDS.contains(&upper.as_str())
        })
}

/// A forbidden keyword in random letter case.
fn arb_cased_keyword() -> impl Strategy<Value = (String, String)> {
    (prop::sample::select(DEFAULT_FORBIDDEN_KEYWORDS), any::<u64>()).prop_map(|(kw, mask)| {
        let cased = kw
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if mask >> (i % 64) & 1 == 1 {
                    c.to_ascii_lowercase()
                } else {
                    c
                }
            })
            .collect();
        (kw.to_string(), cased)
    })
}

/// Table names that can never collide with SQL keywords or heuristics.
fn arb_table_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("t_[a-z]{1,8}").unwrap()
}

/// Well-formed single SELECT statements, with and without a limit clause.
fn arb_bounded_query() -> impl Strategy<Value = String> {
    let body = prop::sample::select(&[
        "SELECT * FROM sessions",
        "SELECT user_id, COUNT(*) FROM sessions GROUP BY user_id",
        "SELECT id FROM events WHERE kind = 'click'",
        "SELECT * FROM (SELECT * FROM sessions LIMIT 5) s",
        "select id from sessions order by id",
    ][..]);
    let limit = prop_oneof![
        Just(String::new()),
        any::<u64>().prop_map(|v| format!(" LIMIT {v}")),
        (0u64..2000).prop_map(|v| format!(" limit {v}")),
        Just(" LIMIT ALL".to_string()),
        Just(" LIMIT $1".to_string()),
    ];
    let offset = prop_oneof![Just(String::new()), (0u64..100).prop_map(|v| format!(" OFFSET {v}"))];
    let terminator = prop_oneof![Just(""), Just(";"), Just(" ; ")];
    (body, limit, offset, terminator)
        .prop_map(|(body, limit, offset, term)| format!("{body}{limit}{offset}{term}"))
}

/// Queries built from fragments that move literal boundaries around:
/// escape strings, stray backslashes, dollar quotes, plain quotes, parens.
/// Words and numbers always carry a trailing space; punctuation may be glued.
fn arb_quote_heavy_query() -> impl Strategy<Value = String> {
    let prefix = prop::sample::select(&[
        "SELECT a FROM sessions ",
        r"SELECT E'\'' AS a, id FROM ",
        "SELECT $$($$ AS a FROM ",
        "SELECT a, ",
    ][..]);
    let fragment = prop::sample::select(&[
        "SELECT ", "FROM ", "JOIN ", "LIMIT ", "WHERE ", "AS ", "a ", "id ", "sessions ",
        "events ", "users ", "5 ", "100000 ", "'", "' ", "E'", r"\", r"\'", "$$", "$t$",
        "(", ")", ",", " = ", " ",
    ][..]);
    (prefix, prop::collection::vec(fragment, 0..20))
        .prop_map(|(prefix, parts)| format!("{prefix}{}", parts.concat()))
}

/// Every `FROM x`/`JOIN x` target in the raw text, lower-cased.
fn raw_sources(sql: &str) -> Vec<String> {
    let re = Regex::new(r"(?i)\b(?:FROM|JOIN)\s+(\w+)").unwrap();
    re.captures_iter(sql).map(|c| c[1].to_lowercase()).collect()
}

/// The integer after the last raw `LIMIT`, if the text ends right there.
fn raw_final_limit(sql: &str) -> Option<u64> {
    let last = Regex::new(r"(?i)\bLIMIT\b").unwrap().find_iter(sql).last()?;
    let tail = Regex::new(r"^\s+([0-9]+)\s*$").unwrap();
    tail.captures(&sql[last.end()..])?[1].parse().ok()
}

fn arb_benign_statement() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&[
        "SELECT * FROM sessions",
        "SELECT id FROM events",
        "select 1 from sessions",
    ][..])
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn non_select_input_is_rejected_by_structure_alone(
        word in arb_non_select_word(),
        tail in "[ -~]{0,60}",
    ) {
        let verdict = evaluate(&format!("{word} {tail}"), &analytics());
        prop_assert!(!verdict.accepted);
        prop_assert_eq!(verdict.violations, vec![Violation::MissingSelect]);
        prop_assert!(verdict.advisories.is_empty());
    }

    #[test]
    fn forbidden_keyword_as_whole_word_is_always_found((keyword, cased) in arb_cased_keyword()) {
        let verdict = evaluate(&format!("SELECT a FROM sessions WHERE {cased} = 1"), &analytics());
        prop_assert!(!verdict.accepted);
        prop_assert!(verdict.violations.contains(&forbidden(&keyword)));
    }

    #[test]
    fn keyword_inside_identifier_is_never_forbidden(
        (_, cased) in arb_cased_keyword(),
        prefix in "[a-z]{0,3}",
        suffix in prop_oneof![Just("_at"), Just("_id"), Just("s"), Just("x1")],
    ) {
        let verdict = evaluate(
            &format!("SELECT {prefix}{cased}{suffix} FROM sessions WHERE id = 1"),
            &analytics(),
        );
        prop_assert!(verdict.accepted, "{:?}", verdict.violations);
    }

    #[test]
    fn one_violation_per_distinct_unlisted_table(names in prop::collection::vec(arb_table_name(), 1..8)) {
        let mut sql = format!("SELECT a FROM {}", names[0]);
        for name in &names[1..] {
            sql.push_str(&format!(" JOIN {name} ON 1 = 1"));
        }

        let mut expected: Vec<Violation> = Vec::new();
        for name in &names {
            let v = unlisted(name);
            if !expected.contains(&v) {
                expected.push(v);
            }
        }

        let verdict = evaluate(&sql, &analytics());
        prop_assert_eq!(verdict.violations, expected);
    }

    #[test]
    fn limit_enforcement_is_idempotent(sql in arb_bounded_query(), max in 1u64..5000) {
        let policy = policy_with(&["sessions", "events"], &["DROP"], max);
        let once = enforce_limit(&sql, &policy);
        let twice = enforce_limit(&once.sql, &policy);
        prop_assert_eq!(&twice.sql, &once.sql);
        prop_assert_eq!(twice.advisory, None);
    }

    #[test]
    fn requested_limit_is_clamped_to_ceiling(v in any::<u64>(), max in 1u64..100_000) {
        let policy = policy_with(&["sessions"], &["DROP"], max);
        let verdict = evaluate(&format!("SELECT id FROM sessions WHERE id > 0 LIMIT {v}"), &policy);
        prop_assert!(verdict.accepted);
        let expected = format!("SELECT id FROM sessions WHERE id > 0 LIMIT {}", v.min(max));
        prop_assert_eq!(verdict.sql, expected);
    }

    #[test]
    fn more_than_one_statement_is_rejected(
        first in arb_benign_statement(),
        second in arb_benign_statement(),
        gap in "[ \t\n]{0,3}",
        trailing in prop_oneof![Just(""), Just(";")],
    ) {
        let verdict = evaluate(&format!("{first};{gap}{second}{trailing}"), &analytics());
        prop_assert!(!verdict.accepted);
        prop_assert!(verdict.violations.contains(&Violation::MultipleStatements));
    }

    #[test]
    fn arbitrary_input_never_panics(input in any::<String>()) {
        let policy = PolicyConfig::analytics_default();
        let verdict = evaluate(&input, &policy);

        prop_assert_eq!(verdict.accepted, verdict.violations.is_empty());
        if verdict.violations.iter().any(Violation::is_structural) {
            prop_assert_eq!(verdict.violations.len(), 1);
        }
        if verdict.accepted {
            let tokens = tokenize(&verdict.sql);
            prop_assert!(tokens.is_ok(), "accepted SQL must tokenize: {}", verdict.sql);
            let tokens = tokens.unwrap_or_default();
            prop_assert!(tokens.first().is_some_and(|t| t.is_word("SELECT")));
            prop_assert!(verdict.sql.to_ascii_uppercase().contains("LIMIT"));
        }
        prop_assert_eq!(evaluate(&input, &policy), verdict);
    }

    #[test]
    fn literal_boundaries_never_hide_a_table_or_the_final_limit(
        sql in arb_quote_heavy_query(),
        max in 1u64..2000,
    ) {
        let policy = policy_with(&["sessions", "events"], &["DROP"], max);
        let verdict = evaluate(&sql, &policy);
        if verdict.accepted {
            for table in raw_sources(&verdict.sql) {
                prop_assert!(
                    policy.is_table_allowed(&table),
                    "{table} slipped through in {}", verdict.sql
                );
            }
            let limit = raw_final_limit(&verdict.sql);
            prop_assert!(
                limit.is_some_and(|n| n <= max),
                "final LIMIT {limit:?} not within {max} in {}", verdict.sql
            );
        }
    }

    #[test]
    fn sql_shaped_input_never_panics(input in "(SELECT|select|FROM|LIMIT|\\(|\\)|;|'|\"|--|/\\*|\\*/|\n| |[a-z_]{1,6}|[0-9]{1,4}|,|\\*){0,40}") {
        let _ = evaluate(&input, &analytics());
    }
}
