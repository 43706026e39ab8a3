use crate::error::PolicyError;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

pub const DEFAULT_MAX_ROW_LIMIT: u64 = 1000;

pub const DEFAULT_ALLOWED_TABLES: &[&str] = &["sessions", "events"];

pub const DEFAULT_FORBIDDEN_KEYWORDS: &[&str] = &[
    "INSERT",
    "UPDATE",
    "DELETE",
    "DROP",
    "CREATE",
    "ALTER",
    "TRUNCATE",
    "EXEC",
    "EXECUTE",
    "GRANT",
    "REVOKE",
    "COMMIT",
    "ROLLBACK",
    "SAVEPOINT",
    "MERGE",
    "COPY",
    "VACUUM",
    "ANALYZE",
    "EXPLAIN",
];

/// `(id, pattern)` pairs, evaluated in order.
pub const DEFAULT_INJECTION_PATTERNS: &[(&str, &str)] = &[
    ("terminator_drop", r"(?i);\s*DROP"),
    ("terminator_delete", r"(?i);\s*DELETE"),
    ("terminator_insert", r"(?i);\s*INSERT"),
    ("line_comment", r"--"),
    ("block_comment", r"/\*"),
    ("xp_cmdshell", r"(?i)xp_cmdshell"),
    ("exec_call", r"(?i)exec\s*\("),
];

/// Words every admitted query depends on; forbidding them would make the
/// gateway's own rewrites trip the policy.
const RESERVED_KEYWORDS: &[&str] = &["SELECT", "FROM", "LIMIT"];

/// A forbidden keyword with its precompiled whole-word, case-insensitive matcher.
#[derive(Clone, Debug)]
pub struct ForbiddenKeyword {
    keyword: String,
    matcher: Regex,
}

impl ForbiddenKeyword {
    pub fn new(keyword: &str) -> Result<Self, PolicyError> {
        let keyword = keyword.trim().to_ascii_uppercase();
        if keyword.is_empty() || !keyword.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(PolicyError::InvalidKeyword(keyword));
        }
        if RESERVED_KEYWORDS.contains(&keyword.as_str()) {
            return Err(PolicyError::ReservedKeyword(keyword));
        }

        // `\b` treats `_` as a word character, so `updated_at` never matches UPDATE.
        let matcher = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&keyword)))
            .case_insensitive(true)
            .build()
            .map_err(|_| PolicyError::InvalidKeyword(keyword.clone()))?;

        Ok(Self { keyword, matcher })
    }

    /// The keyword in upper case.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// A named injection heuristic.
#[derive(Clone, Debug)]
pub struct InjectionPattern {
    id: String,
    regex: Regex,
}

impl InjectionPattern {
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self, PolicyError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PolicyError::EmptyPatternId);
        }
        let regex = Regex::new(pattern).map_err(|source| PolicyError::InvalidPattern {
            id: id.clone(),
            source,
        })?;
        Ok(Self { id, regex })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Immutable gateway policy, constructed once and passed to every call.
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    allowed_tables: BTreeSet<String>,
    forbidden_keywords: Vec<ForbiddenKeyword>,
    injection_patterns: Vec<InjectionPattern>,
    max_row_limit: u64,
}

impl PolicyConfig {
    /// Validate and build a policy.
    ///
    /// Table names are compared case-insensitively. Duplicate keywords are
    /// collapsed (first occurrence wins) so each produces at most one violation.
    pub fn new<T, K>(
        allowed_tables: T,
        forbidden_keywords: K,
        injection_patterns: Vec<InjectionPattern>,
        max_row_limit: u64,
    ) -> Result<Self, PolicyError>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        if max_row_limit == 0 {
            return Err(PolicyError::ZeroRowLimit);
        }

        let mut tables = BTreeSet::new();
        for table in allowed_tables {
            let table = table.as_ref().trim();
            if table.is_empty() || table.contains(char::is_whitespace) {
                return Err(PolicyError::InvalidTableName(table.to_string()));
            }
            tables.insert(table.to_lowercase());
        }
        if tables.is_empty() {
            return Err(PolicyError::EmptyAllowlist);
        }

        let mut keywords: Vec<ForbiddenKeyword> = Vec::new();
        for keyword in forbidden_keywords {
            let keyword = ForbiddenKeyword::new(keyword.as_ref())?;
            if !keywords.iter().any(|k| k.keyword == keyword.keyword) {
                keywords.push(keyword);
            }
        }

        let mut seen = BTreeSet::new();
        for pattern in &injection_patterns {
            if !seen.insert(pattern.id.as_str()) {
                return Err(PolicyError::DuplicatePatternId(pattern.id.clone()));
            }
        }

        Ok(Self {
            allowed_tables: tables,
            forbidden_keywords: keywords,
            injection_patterns,
            max_row_limit,
        })
    }

    /// The built-in analytics policy: `sessions` and `events`, read-only, 1000 rows.
    pub fn analytics_default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_TABLES.iter().copied(),
            DEFAULT_FORBIDDEN_KEYWORDS.iter().copied(),
            default_injection_patterns(),
            DEFAULT_MAX_ROW_LIMIT,
        )
        .expect("built-in analytics policy must be valid")
    }

    /// Lower-cased table allowlist, sorted.
    pub fn allowed_tables(&self) -> impl Iterator<Item = &str> {
        self.allowed_tables.iter().map(String::as_str)
    }

    pub fn is_table_allowed(&self, name: &str) -> bool {
        self.allowed_tables.contains(&name.to_lowercase())
    }

    pub fn forbidden_keywords(&self) -> &[ForbiddenKeyword] {
        &self.forbidden_keywords
    }

    pub fn injection_patterns(&self) -> &[InjectionPattern] {
        &self.injection_patterns
    }

    pub fn max_row_limit(&self) -> u64 {
        self.max_row_limit
    }
}

/// The built-in heuristics, compiled.
pub fn default_injection_patterns() -> Vec<InjectionPattern> {
    DEFAULT_INJECTION_PATTERNS
        .iter()
        .map(|(id, pattern)| {
            InjectionPattern::new(*id, pattern).expect("built-in injection patterns must compile")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytics_default_matches_builtin_lists() {
        let policy = PolicyConfig::analytics_default();
        assert_eq!(policy.max_row_limit(), 1000);
        assert_eq!(
            policy.allowed_tables().collect::<Vec<_>>(),
            vec!["events", "sessions"]
        );
        assert_eq!(
            policy.forbidden_keywords().len(),
            DEFAULT_FORBIDDEN_KEYWORDS.len()
        );
        let ids: Vec<_> = policy.injection_patterns().iter().map(|p| p.id()).collect();
        assert_eq!(ids[0], "terminator_drop");
        assert_eq!(ids.len(), DEFAULT_INJECTION_PATTERNS.len());
    }

    #[test]
    fn tables_are_case_insensitive() {
        let policy = PolicyConfig::new(["Sessions"], ["DROP"], Vec::new(), 10).unwrap();
        assert!(policy.is_table_allowed("SESSIONS"));
        assert!(policy.is_table_allowed("sessions"));
        assert!(!policy.is_table_allowed("users"));
    }

    #[test]
    fn rejects_zero_limit_and_empty_allowlist() {
        let err = PolicyConfig::new(["sessions"], ["DROP"], Vec::new(), 0).unwrap_err();
        assert!(matches!(err, PolicyError::ZeroRowLimit));

        let err = PolicyConfig::new(Vec::<String>::new(), ["DROP"], Vec::new(), 10).unwrap_err();
        assert!(matches!(err, PolicyError::EmptyAllowlist));
    }

    #[test]
    fn rejects_multi_word_and_reserved_keywords() {
        let err = PolicyConfig::new(["sessions"], ["GROUP BY"], Vec::new(), 10).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidKeyword(_)));

        let err = PolicyConfig::new(["sessions"], ["limit"], Vec::new(), 10).unwrap_err();
        assert!(matches!(err, PolicyError::ReservedKeyword(k) if k == "LIMIT"));
    }

    #[test]
    fn duplicate_keywords_collapse() {
        let policy =
            PolicyConfig::new(["sessions"], ["drop", "DROP", "Drop"], Vec::new(), 10).unwrap();
        assert_eq!(policy.forbidden_keywords().len(), 1);
        assert_eq!(policy.forbidden_keywords()[0].keyword(), "DROP");
    }

    #[test]
    fn rejects_bad_and_duplicate_patterns() {
        let err = InjectionPattern::new("broken", "(unclosed").unwrap_err();
        assert!(matches!(err, PolicyError::InvalidPattern { ref id, .. } if id == "broken"));

        let patterns = vec![
            InjectionPattern::new("a", "x").unwrap(),
            InjectionPattern::new("a", "y").unwrap(),
        ];
        let err = PolicyConfig::new(["sessions"], ["DROP"], patterns, 10).unwrap_err();
        assert!(matches!(err, PolicyError::DuplicatePatternId(id) if id == "a"));
    }

    #[test]
    fn keyword_matcher_respects_word_boundaries() {
        let update = ForbiddenKeyword::new("update").unwrap();
        assert!(update.is_match("UPDATE sessions SET x = 1"));
        assert!(update.is_match("select 1; update t"));
        assert!(!update.is_match("SELECT updated_at FROM sessions"));
        assert!(!update.is_match("SELECT last_update FROM sessions"));

        let create = ForbiddenKeyword::new("CREATE").unwrap();
        assert!(!create.is_match("SELECT createdAt FROM events"));
    }
}
