use super::ScanInput;
use crate::lexer::{Token, TokenKind};
use crate::policy::PolicyConfig;
use regex::Regex;
use sqlgate_types::Violation;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// A FROM or JOIN followed by a name, read off raw text.
static RAW_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:FROM|JOIN)\s+(\w+)").expect("source pattern compiles")
});

/// Functions whose argument syntax uses FROM without naming a data source.
const ARGUMENT_FROM_FUNCTIONS: &[&str] = &["EXTRACT", "SUBSTRING", "TRIM", "OVERLAY"];

/// Words that end a source list item instead of aliasing it.
const CLAUSE_WORDS: &[&str] = &[
    "WHERE",
    "GROUP",
    "ORDER",
    "HAVING",
    "LIMIT",
    "OFFSET",
    "FETCH",
    "FOR",
    "WINDOW",
    "UNION",
    "EXCEPT",
    "INTERSECT",
    "JOIN",
    "INNER",
    "LEFT",
    "RIGHT",
    "FULL",
    "CROSS",
    "NATURAL",
    "ON",
    "USING",
    "TABLESAMPLE",
];

/// One violation per distinct unlisted table, in first-seen order.
///
/// Text that does not tokenize is scanned raw, like the inside of a literal.
pub fn run(input: &ScanInput<'_>, policy: &PolicyConfig, out: &mut Vec<Violation>) {
    let tables = match &input.tokens {
        Some(tokens) => extract_tables(tokens),
        None => raw_sources(input.text).collect(),
    };
    let mut reported = BTreeSet::new();
    for table in tables {
        if !policy.is_table_allowed(&table) && reported.insert(table.clone()) {
            out.push(Violation::UnlistedTable { table });
        }
    }
}

/// Every table named after FROM or JOIN, lower-cased, in text order.
///
/// Comma-separated source lists are followed item by item. Subqueries are
/// skipped here because their own FROM is visited by the outer loop.
///
/// A source position holding anything other than a name or a `(` is
/// returned verbatim so it fails the allowlist. `FROM x`/`JOIN x` inside
/// literals and quoted identifiers is returned as well: the database never
/// reads it, but a mismatch about where a literal ends must not let a table
/// through.
pub fn extract_tables(tokens: &[Token<'_>]) -> Vec<String> {
    // (token index, name) so nested sources sort back into text order.
    let mut tables: Vec<(usize, String)> = Vec::new();
    // Name of the function that opened each enclosing paren, if any.
    let mut openers: Vec<Option<String>> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Punct('(') => {
                let opener = i
                    .checked_sub(1)
                    .and_then(|p| tokens.get(p))
                    .filter(|t| t.kind == TokenKind::Word)
                    .map(|t| t.text.to_ascii_uppercase());
                openers.push(opener);
            }
            TokenKind::Punct(')') => {
                openers.pop();
            }
            TokenKind::Word if token.is_word("FROM") => {
                let in_argument_list = openers
                    .last()
                    .and_then(|o| o.as_deref())
                    .is_some_and(|name| ARGUMENT_FROM_FUNCTIONS.contains(&name));
                if !in_argument_list && !is_distinct_from(tokens, i) {
                    collect_source_list(tokens, i + 1, &mut tables);
                }
            }
            TokenKind::Word if token.is_word("JOIN") => {
                match qualified_name(tokens, i + 1) {
                    Some((name, _)) => tables.push((i + 1, name)),
                    None => push_non_name(tokens, i + 1, &mut tables),
                }
            }
            _ if token.is_quoted() => {
                tables.extend(raw_sources(token.text).map(|name| (i, name)));
            }
            _ => {}
        }
    }

    tables.sort_by_key(|(at, _)| *at);
    tables.into_iter().map(|(_, name)| name).collect()
}

/// `a IS [NOT] DISTINCT FROM b` compares values; `b` is not a table.
fn is_distinct_from(tokens: &[Token<'_>], from_idx: usize) -> bool {
    let prev = |n: usize| from_idx.checked_sub(n).and_then(|p| tokens.get(p));
    prev(1).is_some_and(|t| t.is_word("DISTINCT"))
        && prev(2).is_some_and(|t| t.is_word("IS") || t.is_word("NOT"))
}

fn collect_source_list(tokens: &[Token<'_>], mut j: usize, tables: &mut Vec<(usize, String)>) {
    loop {
        match qualified_name(tokens, j) {
            Some((name, next)) => {
                tables.push((j, name));
                j = next;
                // Table function arguments.
                if tokens.get(j).is_some_and(|t| t.is_punct('(')) {
                    j = skip_group(tokens, j);
                }
            }
            None if tokens.get(j).is_some_and(|t| t.is_punct('(')) => {
                j = skip_group(tokens, j);
            }
            None => {
                push_non_name(tokens, j, tables);
                return;
            }
        }

        // Optional alias, then an optional column alias list.
        if tokens.get(j).is_some_and(|t| t.is_word("AS")) {
            j += 1;
        }
        if tokens.get(j).is_some_and(is_alias) {
            j += 1;
        }
        if tokens.get(j).is_some_and(|t| t.is_punct('(')) {
            j = skip_group(tokens, j);
        }

        if tokens.get(j).is_some_and(|t| t.is_punct(',')) {
            j += 1;
        } else {
            return;
        }
    }
}

/// Record whatever sits where a source name was expected, unless it opens a subquery.
fn push_non_name(tokens: &[Token<'_>], j: usize, tables: &mut Vec<(usize, String)>) {
    if let Some(token) = tokens.get(j)
        && !token.is_punct('(')
    {
        tables.push((j, token.text.to_lowercase()));
    }
}

fn raw_sources(text: &str) -> impl Iterator<Item = String> + '_ {
    RAW_SOURCE
        .captures_iter(text)
        .map(|caps| caps[1].to_lowercase())
}

fn is_alias(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::QuotedIdent => true,
        TokenKind::Word => !CLAUSE_WORDS.iter().any(|w| token.is_word(w)),
        _ => false,
    }
}

/// Read `ident(.ident)*` starting at `j`; returns the lower-cased name and the next index.
fn qualified_name(tokens: &[Token<'_>], mut j: usize) -> Option<(String, usize)> {
    let mut name = tokens.get(j)?.ident()?;
    j += 1;
    while tokens.get(j).is_some_and(|t| t.is_punct('.')) {
        let Some(part) = tokens.get(j + 1).and_then(Token::ident) else {
            break;
        };
        name.push('.');
        name.push_str(&part);
        j += 2;
    }
    Some((name.to_lowercase(), j))
}

/// Index just past the `)` matching the `(` at `open`.
fn skip_group(tokens: &[Token<'_>], open: usize) -> usize {
    let depth = tokens[open].depth;
    tokens[open + 1..]
        .iter()
        .position(|t| t.is_punct(')') && t.depth == depth)
        .map(|p| open + 1 + p + 1)
        .unwrap_or(tokens.len())
}
