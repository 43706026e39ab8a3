//! Rendering utilities for CI surfaces (Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{RenderableItem, RenderablePolicy, RenderableReport, RenderableStatus};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn rejected() -> RenderableReport {
        RenderableReport {
            status: RenderableStatus::Rejected,
            sql: "SELECT * FROM users LIMIT 1000".to_string(),
            policy: RenderablePolicy {
                profile: "analytics".to_string(),
                max_row_limit: 1000,
            },
            violations: vec![RenderableItem {
                code: "unlisted_table".to_string(),
                message: "table is not allowlisted: users".to_string(),
                help: Some("Query only allowlisted tables.".to_string()),
            }],
            advisories: vec![
                RenderableItem {
                    code: "limit_injected".to_string(),
                    message: "no LIMIT given, added LIMIT 1000".to_string(),
                    help: None,
                },
                RenderableItem {
                    code: "wildcard_projection".to_string(),
                    message: "SELECT * is discouraged, name the columns explicitly".to_string(),
                    help: None,
                },
            ],
        }
    }

    pub fn accepted() -> RenderableReport {
        RenderableReport {
            status: RenderableStatus::Accepted,
            sql: "SELECT id FROM sessions WHERE id = 1 LIMIT 1000".to_string(),
            violations: Vec::new(),
            advisories: Vec::new(),
            ..rejected()
        }
    }
}
