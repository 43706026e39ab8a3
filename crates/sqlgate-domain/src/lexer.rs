//! Span-preserving tokens over sqlparser's PostgreSQL tokenizer.
//!
//! This is not a parser. sqlparser decides where literals, quoted
//! identifiers, dollar-quoted bodies and comments begin and end; this module
//! maps its line/column locations back to byte spans and tracks parenthesis
//! depth, which is what the table extractor, the limit enforcer and the
//! advisory pass need.

use crate::error::LexError;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Location, Token as SqlToken, TokenWithLocation, Tokenizer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Unquoted identifier or keyword.
    Word,
    /// Unsigned numeric literal (`42`, `4.2`).
    Number,
    /// Any string literal, delimiters included: `'...'`, `E'...'`, `$$...$$`.
    StringLit,
    /// `"..."` quoted identifier, quotes included.
    QuotedIdent,
    /// Any other single character.
    Punct(char),
    /// Multi-character operators and placeholders (`<>`, `::`, `$1`).
    Operator,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Parenthesis nesting level; a `(`/`)` pair shares the level outside it.
    pub depth: u32,
}

impl Token<'_> {
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    /// Literal or quoted identifier: text the database never reads as SQL.
    pub fn is_quoted(&self) -> bool {
        matches!(self.kind, TokenKind::StringLit | TokenKind::QuotedIdent)
    }

    /// Identifier text with surrounding quotes removed and `""` unescaped.
    pub fn ident(&self) -> Option<String> {
        match self.kind {
            TokenKind::Word => Some(self.text.to_string()),
            TokenKind::QuotedIdent => {
                let inner = self.text.strip_prefix('"').unwrap_or(self.text);
                let inner = inner.strip_suffix('"').unwrap_or(inner);
                Some(inner.replace("\"\"", "\""))
            }
            _ => None,
        }
    }
}

/// A sqlparser token with the byte span it covers, whitespace and comments included.
pub(crate) struct Lexeme {
    pub token: SqlToken,
    pub start: usize,
    pub end: usize,
}

/// Every lexeme in `text`, comments and whitespace included.
///
/// Fails when a string, quoted identifier, dollar-quoted body or block
/// comment is left open.
pub(crate) fn lex(text: &str) -> Result<Vec<Lexeme>, LexError> {
    let dialect = PostgreSqlDialect {};
    let located = Tokenizer::new(&dialect, text)
        .tokenize_with_location()
        .map_err(|e| LexError(e.to_string()))?;

    let starts = byte_offsets(text, &located);
    let mut lexemes = Vec::with_capacity(located.len());
    for (i, TokenWithLocation { token, .. }) in located.into_iter().enumerate() {
        if token == SqlToken::EOF {
            continue;
        }
        let start = starts[i];
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        lexemes.push(Lexeme { token, start, end });
    }
    Ok(lexemes)
}

/// Byte offset of each token's 1-based line/column location.
///
/// Locations are visited in order, so one forward walk over the text suffices.
fn byte_offsets(text: &str, located: &[TokenWithLocation]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(located.len());
    let mut chars = text.char_indices().peekable();
    let mut at = Location { line: 1, column: 1 };

    for token in located {
        let target = &token.location;
        while (at.line, at.column) < (target.line, target.column) {
            let Some((_, c)) = chars.next() else { break };
            if c == '\n' {
                at.line += 1;
                at.column = 1;
            } else {
                at.column += 1;
            }
        }
        offsets.push(chars.peek().map_or(text.len(), |&(i, _)| i));
    }

    offsets
}

/// Tokens of `text` with comments and whitespace dropped.
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens = Vec::new();
    let mut depth: u32 = 0;

    for lexeme in lex(text)? {
        let slice = &text[lexeme.start..lexeme.end];
        let Some(kind) = classify(&lexeme.token, slice) else {
            continue;
        };

        let token_depth = match kind {
            TokenKind::Punct('(') => {
                depth += 1;
                depth - 1
            }
            TokenKind::Punct(')') => {
                depth = depth.saturating_sub(1);
                depth
            }
            _ => depth,
        };

        tokens.push(Token {
            kind,
            text: slice,
            start: lexeme.start,
            end: lexeme.end,
            depth: token_depth,
        });
    }

    Ok(tokens)
}

/// `None` for whitespace and comments.
fn classify(token: &SqlToken, text: &str) -> Option<TokenKind> {
    let kind = match token {
        SqlToken::Whitespace(_) | SqlToken::EOF => return None,
        SqlToken::Word(word) if word.quote_style.is_some() => TokenKind::QuotedIdent,
        SqlToken::Word(_) => TokenKind::Word,
        SqlToken::Number(..) => TokenKind::Number,
        _ if is_literal_text(text) => TokenKind::StringLit,
        _ => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => TokenKind::Punct(c),
                _ => TokenKind::Operator,
            }
        }
    };
    Some(kind)
}

/// String literals of every flavour end in their closing delimiter.
fn is_literal_text(text: &str) -> bool {
    text.ends_with('\'')
        || text.ends_with('"')
        || (text.len() > 1 && text.starts_with('$') && text.ends_with('$'))
}
