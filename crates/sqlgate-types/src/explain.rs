//! Explain registry for violation and advisory tags.
//!
//! Maps each stable tag to a human-readable explanation with remediation guidance.

use crate::ids;

/// Explanation entry for a tag.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the tag.
    pub title: &'static str,
    /// What triggers it and why it exists.
    pub description: &'static str,
    /// How to reformulate the query.
    pub remediation: &'static str,
    /// Before/after SQL examples.
    pub examples: ExamplePair,
}

/// Before and after SQL examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// SQL that would trigger the tag.
    pub before: &'static str,
    /// SQL that does not.
    pub after: &'static str,
}

/// Look up an explanation by violation or advisory tag.
///
/// Returns `None` if the tag is not recognized.
pub fn lookup_explanation(code: &str) -> Option<Explanation> {
    match code {
        ids::CODE_EMPTY_INPUT => Some(explain_empty_input()),
        ids::CODE_MISSING_SELECT => Some(explain_missing_select()),
        ids::CODE_MISSING_SOURCE => Some(explain_missing_source()),
        ids::CODE_MALFORMED_INPUT => Some(explain_malformed_input()),
        ids::CODE_FORBIDDEN_OPERATION => Some(explain_forbidden_operation()),
        ids::CODE_INJECTION_PATTERN => Some(explain_injection_pattern()),
        ids::CODE_UNLISTED_TABLE => Some(explain_unlisted_table()),
        ids::CODE_MULTIPLE_STATEMENTS => Some(explain_multiple_statements()),

        ids::CODE_LIMIT_INJECTED => Some(explain_limit_injected()),
        ids::CODE_LIMIT_CLAMPED => Some(explain_limit_clamped()),
        ids::CODE_WILDCARD_PROJECTION => Some(explain_wildcard_projection()),
        ids::CODE_NO_FILTER_CLAUSE => Some(explain_no_filter_clause()),

        _ => None,
    }
}

/// List all violation tags, structural first.
pub fn all_violation_codes() -> &'static [&'static str] {
    &[
        ids::CODE_EMPTY_INPUT,
        ids::CODE_MISSING_SELECT,
        ids::CODE_MISSING_SOURCE,
        ids::CODE_MALFORMED_INPUT,
        ids::CODE_FORBIDDEN_OPERATION,
        ids::CODE_INJECTION_PATTERN,
        ids::CODE_UNLISTED_TABLE,
        ids::CODE_MULTIPLE_STATEMENTS,
    ]
}

/// List all advisory tags.
pub fn all_advisory_codes() -> &'static [&'static str] {
    &[
        ids::CODE_LIMIT_INJECTED,
        ids::CODE_LIMIT_CLAMPED,
        ids::CODE_WILDCARD_PROJECTION,
        ids::CODE_NO_FILTER_CLAUSE,
    ]
}

// --- Structural ---

fn explain_empty_input() -> Explanation {
    Explanation {
        title: "Empty Query",
        description: "\
The candidate contained nothing after comments and whitespace were removed.

Nothing is scanned or executed for an empty candidate.",
        remediation: "\
Submit a single SELECT statement. If the text came from a generator, check that
the generator actually produced SQL rather than only an explanation.",
        examples: ExamplePair {
            before: "-- just a comment",
            after: "SELECT COUNT(*) FROM sessions",
        },
    }
}

fn explain_missing_select() -> Explanation {
    Explanation {
        title: "Query Must Start With SELECT",
        description: "\
Only read queries are admitted. The first word of the normalized statement must
be SELECT.

CTEs (`WITH ...`), `VALUES`, `TABLE x` and every data-modifying statement are
rejected here, before any other check runs.",
        remediation: "\
Rewrite the query as a plain SELECT. Inline a CTE as a subquery in the FROM
clause if needed.",
        examples: ExamplePair {
            before: "WITH s AS (SELECT * FROM sessions) SELECT COUNT(*) FROM s",
            after: "SELECT COUNT(*) FROM (SELECT * FROM sessions) s",
        },
    }
}

fn explain_missing_source() -> Explanation {
    Explanation {
        title: "Query Must Read From A Table",
        description: "\
The statement has no FROM clause. Queries without a data source are not useful
for analytics and are rejected.",
        remediation: "Add a FROM clause naming one of the allowlisted tables.",
        examples: ExamplePair {
            before: "SELECT NOW()",
            after: "SELECT MAX(started_at) FROM sessions",
        },
    }
}

fn explain_malformed_input() -> Explanation {
    Explanation {
        title: "Malformed Query Text",
        description: "\
A string literal, quoted identifier, dollar-quoted body or block comment is
never closed, or the parentheses do not balance.

Where a literal ends decides which words the database reads as SQL. When that
boundary cannot be found the text is rejected before any other check runs.",
        remediation: "\
Close every quote and comment. PostgreSQL escape strings (`E'...'`) treat a
backslash-quote as part of the literal; plain strings do not.",
        examples: ExamplePair {
            before: "SELECT 'open FROM sessions",
            after: "SELECT 'closed' FROM sessions",
        },
    }
}

// --- Policy ---

fn explain_forbidden_operation() -> Explanation {
    Explanation {
        title: "Forbidden Operation",
        description: "\
The statement contains a keyword from the forbidden list (for example INSERT,
UPDATE, DELETE, DROP, ALTER, TRUNCATE, GRANT, COPY).

Keywords are matched case-insensitively as whole words, so identifiers such as
`updated_at` or `createdAt` do not trigger. A keyword inside a string literal
does trigger.",
        remediation: "\
Remove the operation. The gateway only admits read queries; data changes must
go through a different, authenticated path.",
        examples: ExamplePair {
            before: "DELETE FROM sessions WHERE id = 1",
            after: "SELECT id FROM sessions WHERE id = 1",
        },
    }
}

fn explain_injection_pattern() -> Explanation {
    Explanation {
        title: "Suspicious Pattern",
        description: "\
A configured injection heuristic matched the normalized statement: a statement
terminator followed by a destructive keyword, a comment opener that survived
normalization (for example inside a string literal or an unterminated block
comment), or a known command-execution token such as `xp_cmdshell`.

This is a heuristic layer; it flags shapes that legitimate analytics queries
do not need.",
        remediation: "\
Remove comment markers and command-execution calls. Avoid `--` and `/*` inside
string literals.",
        examples: ExamplePair {
            before: "SELECT * FROM sessions WHERE user_id = '1' /* unterminated",
            after: "SELECT * FROM sessions WHERE user_id = '1'",
        },
    }
}

fn explain_unlisted_table() -> Explanation {
    Explanation {
        title: "Table Not Allowlisted",
        description: "\
A FROM or JOIN clause names a table that is not in the allowlist. Anything not
listed is denied, including schema-qualified names and table functions.",
        remediation: "Query only the allowlisted tables.",
        examples: ExamplePair {
            before: "SELECT * FROM users",
            after: "SELECT user_id FROM sessions",
        },
    }
}

fn explain_multiple_statements() -> Explanation {
    Explanation {
        title: "Multiple Statements",
        description: "\
The text splits into more than one non-empty statement on `;`. Exactly one
statement is admitted, even when the second one looks harmless.

A single trailing terminator is fine.",
        remediation: "Submit one statement per request.",
        examples: ExamplePair {
            before: "SELECT * FROM sessions; SELECT * FROM events",
            after: "SELECT * FROM sessions",
        },
    }
}

// --- Advisories ---

fn explain_limit_injected() -> Explanation {
    Explanation {
        title: "Row Limit Added",
        description: "\
The statement had no usable top-level LIMIT, so one was added with the
configured maximum. A LIMIT inside a subquery does not bound the outer query,
and `LIMIT ALL` or a non-literal value is replaced.",
        remediation: "Add an explicit `LIMIT n` to choose a smaller page size.",
        examples: ExamplePair {
            before: "SELECT event_name FROM events",
            after: "SELECT event_name FROM events LIMIT 100",
        },
    }
}

fn explain_limit_clamped() -> Explanation {
    Explanation {
        title: "Row Limit Lowered",
        description: "\
The statement's LIMIT exceeded the configured maximum and was rewritten to the
maximum.",
        remediation: "Request at most the configured maximum number of rows.",
        examples: ExamplePair {
            before: "SELECT * FROM sessions LIMIT 5000",
            after: "SELECT * FROM sessions LIMIT 1000",
        },
    }
}

fn explain_wildcard_projection() -> Explanation {
    Explanation {
        title: "Wildcard Projection",
        description: "\
The statement selects `*`. This is allowed but returns columns the caller
probably does not need. `COUNT(*)` is not a wildcard projection.",
        remediation: "Name the columns you need.",
        examples: ExamplePair {
            before: "SELECT * FROM events",
            after: "SELECT event_name, timestamp FROM events",
        },
    }
}

fn explain_no_filter_clause() -> Explanation {
    Explanation {
        title: "No Filter Clause",
        description: "\
The statement has neither WHERE nor GROUP BY. It is bounded by the row limit
but may still scan the whole table.",
        remediation: "Filter or aggregate the rows you are interested in.",
        examples: ExamplePair {
            before: "SELECT user_id FROM sessions",
            after: "SELECT user_id FROM sessions WHERE started_at >= NOW() - INTERVAL '7 days'",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_code_has_an_explanation() {
        for code in all_violation_codes().iter().chain(all_advisory_codes()) {
            let exp = lookup_explanation(code).expect("explanation");
            assert!(!exp.title.is_empty(), "{code} has empty title");
            assert!(!exp.remediation.is_empty(), "{code} has empty remediation");
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(lookup_explanation("deps.no_wildcards").is_none());
    }
}
