use crate::lexer::{Token, tokenize};
use sqlgate_types::Advisory;

/// Non-blocking observations about the final SQL.
pub(crate) fn stylistic(sql: &str) -> Vec<Advisory> {
    let tokens = tokenize(sql).unwrap_or_default();
    let mut out = Vec::new();

    if has_wildcard_projection(&tokens) {
        out.push(Advisory::WildcardProjection);
    }
    if !has_filter_clause(&tokens) {
        out.push(Advisory::NoFilterClause);
    }

    out
}

/// `SELECT *`, `SELECT DISTINCT *`, `a, *` and `t.*`; `COUNT(*)` is an aggregate.
fn has_wildcard_projection(tokens: &[Token<'_>]) -> bool {
    tokens.windows(2).any(|pair| {
        let (prev, star) = (&pair[0], &pair[1]);
        star.is_punct('*')
            && (prev.is_word("SELECT")
                || prev.is_word("DISTINCT")
                || prev.is_word("ALL")
                || prev.is_punct(',')
                || prev.is_punct('.'))
    })
}

fn has_filter_clause(tokens: &[Token<'_>]) -> bool {
    tokens.iter().any(|t| t.is_word("WHERE"))
        || tokens
            .windows(2)
            .any(|pair| pair[0].is_word("GROUP") && pair[1].is_word("BY"))
}
