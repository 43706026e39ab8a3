//! The policy scanner: an ordered list of independent checks.
//!
//! Every check runs; violations accumulate in check order so identical input
//! always yields an identically ordered list.

use crate::lexer::{Token, tokenize};
use crate::policy::PolicyConfig;
use sqlgate_types::Violation;

mod forbidden_keywords;
mod injection;
mod multiple_statements;
mod table_allowlist;


pub use table_allowlist::extract_tables;

/// Normalized text plus its tokens, shared by every check.
///
/// `tokens` is `None` when the text does not tokenize; token-based checks
/// then fall back to scanning the raw text.
pub struct ScanInput<'a> {
    pub text: &'a str,
    pub tokens: Option<Vec<Token<'a>>>,
}

impl<'a> ScanInput<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: tokenize(text).ok(),
        }
    }
}

/// Run every check over normalized SQL and collect the violations.
pub fn scan(normalized: &str, policy: &PolicyConfig) -> Vec<Violation> {
    let input = ScanInput::new(normalized);
    let mut out = Vec::new();
    run_all(&input, policy, &mut out);
    out
}

pub fn run_all(input: &ScanInput<'_>, policy: &PolicyConfig, out: &mut Vec<Violation>) {
    forbidden_keywords::run(input, policy, out);
    injection::run(input, policy, out);
    table_allowlist::run(input, policy, out);
    multiple_statements::run(input, policy, out);
}
