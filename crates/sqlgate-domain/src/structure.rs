//! The structural gate: one plausible SELECT or nothing else runs.

use crate::lexer::{Token, tokenize};
use crate::policy::PolicyConfig;
use sqlgate_types::Violation;

/// Return the single fatal structural violation, if any.
///
/// Checked in order: empty text, the leading word, tokenizability and
/// parenthesis balance, then a FROM outside literals that is not left
/// dangling at the end.
///
/// When the leading word is itself a forbidden keyword (`DELETE FROM ...`)
/// the violation names that operation instead of reporting a missing SELECT.
/// This `ForbiddenOperation` is the one non-structural violation returned
/// here, and the only case where input not starting with SELECT is rejected
/// with something other than `MissingSelect` alone.
pub fn check_structure(normalized: &str, policy: &PolicyConfig) -> Option<Violation> {
    if normalized.is_empty() {
        return Some(Violation::EmptyInput);
    }

    let leading = leading_word(normalized);
    if !leading.eq_ignore_ascii_case("SELECT") {
        if let Some(forbidden) = policy
            .forbidden_keywords()
            .iter()
            .find(|k| leading.eq_ignore_ascii_case(k.keyword()))
        {
            return Some(Violation::ForbiddenOperation {
                keyword: forbidden.keyword().to_string(),
            });
        }
        return Some(Violation::MissingSelect);
    }

    let Ok(tokens) = tokenize(normalized) else {
        return Some(Violation::MalformedInput);
    };
    if !parens_balance(&tokens) {
        return Some(Violation::MalformedInput);
    }

    // A trailing FROM or JOIN would take the appended LIMIT as its source.
    let last = tokens.iter().rev().find(|t| !t.is_punct(';'));
    if !tokens.iter().any(|t| t.is_word("FROM"))
        || last.is_some_and(|t| t.is_word("FROM") || t.is_word("JOIN"))
    {
        return Some(Violation::MissingSource);
    }

    None
}

/// The unquoted identifier the text starts with, or `""`.
///
/// Read straight off the text so input that fails to tokenize still gets
/// its leading word judged first.
fn leading_word(text: &str) -> &str {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_alphabetic() || c == '_' => {}
        _ => return "",
    }
    let end = chars
        .find(|&(_, c)| !(c.is_alphabetic() || c.is_ascii_digit() || c == '$' || c == '_'))
        .map_or(text.len(), |(i, _)| i);
    &text[..end]
}

fn parens_balance(tokens: &[Token<'_>]) -> bool {
    let mut open: usize = 0;
    for token in tokens {
        if token.is_punct('(') {
            open += 1;
        } else if token.is_punct(')') {
            let Some(rest) = open.checked_sub(1) else {
                return false;
            };
            open = rest;
        }
    }
    open == 0
}
