use crate::advisories;
use crate::checks;
use crate::error::PolicyViolation;
use crate::limit::enforce_limit;
use crate::normalize::normalize;
use crate::policy::PolicyConfig;
use crate::structure::check_structure;
use sqlgate_types::{Advisory, Verdict};
use std::fmt;

/// Decide whether `candidate` may be executed under `policy`.
///
/// Policy outcomes are never errors: a rejection is a fully described
/// `Verdict`. The limit enforcer runs even when the scanner found violations,
/// so a rejected verdict still shows the canonical SQL the gateway would have
/// produced. Only `accepted` gates execution.
pub fn evaluate(candidate: &str, policy: &PolicyConfig) -> Verdict {
    let normalized = normalize(candidate);

    if let Some(fatal) = check_structure(&normalized, policy) {
        return Verdict::new(normalized, vec![fatal], Vec::new());
    }

    let violations = checks::scan(&normalized, policy);

    let bounded = enforce_limit(&normalized, policy);
    let mut advisories: Vec<Advisory> = bounded.advisory.into_iter().collect();
    advisories.extend(advisories::stylistic(&bounded.sql));

    Verdict::new(bounded.sql, violations, advisories)
}

/// Result-or-fail wrapper over [`evaluate`].
pub fn evaluate_strict(candidate: &str, policy: &PolicyConfig) -> Result<ApprovedSql, PolicyViolation> {
    let verdict = evaluate(candidate, policy);
    if verdict.accepted {
        Ok(ApprovedSql {
            sql: verdict.sql,
            advisories: verdict.advisories,
        })
    } else {
        Err(PolicyViolation {
            violations: verdict.violations,
        })
    }
}

/// SQL the gateway accepted. Only [`evaluate_strict`] can produce one, so an
/// executor that takes `ApprovedSql` cannot be handed unchecked text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovedSql {
    sql: String,
    advisories: Vec<Advisory>,
}

impl ApprovedSql {
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn into_string(self) -> String {
        self.sql
    }
}

impl AsRef<str> for ApprovedSql {
    fn as_ref(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for ApprovedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
