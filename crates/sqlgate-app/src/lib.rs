//! Use case orchestration for sqlgate.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain and
//! render layers. It stays thin and delegates the decision itself to `sqlgate-domain`.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod policy;
mod render;
mod report;

pub use check::{CheckInput, CheckOutput, ensure_safe_sql, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use policy::{load_policy, policy_summary};
pub use render::{render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, serialize_report, to_renderable};
