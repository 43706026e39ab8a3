//! Comment stripping and whitespace collapsing.

use crate::lexer::lex;
use sqlparser::tokenizer::Token;

/// Normalize candidate SQL for scanning.
///
/// - `-- ...` line comments and `/* ... */` block comments are removed; a
///   removed comment separates tokens like whitespace does
/// - whitespace runs between tokens collapse to one space; the result is trimmed
/// - literals, quoted identifiers and dollar-quoted bodies are copied byte for byte
///
/// Text that cannot be tokenized (an open literal or block comment) is only
/// trimmed; the structural gate rejects it.
///
/// Keyword and identifier order is never changed. Everything the gateway
/// scans, and everything it returns for execution, is derived from this text.
pub fn normalize(text: &str) -> String {
    let Ok(lexemes) = lex(text) else {
        return text.trim().to_string();
    };

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for lexeme in lexemes {
        if matches!(lexeme.token, Token::Whitespace(_)) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push_str(&text[lexeme.start..lexeme.end]);
    }

    out
}
