//! Stable DTOs and tags used across the sqlgate workspace.
//!
//! This crate is intentionally boring:
//! - the gateway's decision types (`Verdict`, `Violation`, `Advisory`)
//! - stable string tags for violations and advisories
//! - the emitted report envelope
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod verdict;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{GateReport, PolicySummary, SCHEMA_REPORT_V1, ToolMeta};
pub use verdict::{Advisory, Verdict, Violation};
