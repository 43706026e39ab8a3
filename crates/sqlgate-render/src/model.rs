#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Accepted,
    Rejected,
}

/// A violation or advisory, already turned into text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableItem {
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderablePolicy {
    pub profile: String,
    pub max_row_limit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub status: RenderableStatus,
    pub sql: String,
    pub policy: RenderablePolicy,
    pub violations: Vec<RenderableItem>,
    pub advisories: Vec<RenderableItem>,
}
