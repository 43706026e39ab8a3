//! Pure SQL safety gateway (no IO).
//!
//! Input: untrusted candidate SQL text and a `PolicyConfig` constructed elsewhere.
//! Output: a `Verdict` holding the canonical SQL, violations, and advisories.

#![forbid(unsafe_code)]

pub mod checks;
pub mod lexer;
pub mod limit;
pub mod normalize;
pub mod policy;
pub mod structure;

mod advisories;
mod engine;
mod error;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{ApprovedSql, evaluate, evaluate_strict};
pub use error::{LexError, PolicyError, PolicyViolation};
pub use limit::{LimitOutcome, enforce_limit, with_row_limit};
pub use normalize::normalize;
pub use policy::{ForbiddenKeyword, InjectionPattern, PolicyConfig};
