use serde::Serialize;

/// Placeholder for any textual field GitHub left out or sent as null.
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_LICENSE: &str = "No license";
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// One repository search hit, with every field already defaulted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub full_name: String,
    pub html_url: String,
    pub description: String,
    pub pushed_at: String,
    pub stargazers_count: u64,
    pub license: String,
}

impl Default for RepositoryRecord {
    fn default() -> Self {
        RepositoryRecord {
            full_name: NOT_AVAILABLE.to_string(),
            html_url: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
            pushed_at: NOT_AVAILABLE.to_string(),
            stargazers_count: 0,
            license: UNKNOWN_LICENSE.to_string(),
        }
    }
}

impl RepositoryRecord {
    pub fn has_description(&self) -> bool {
        !self.description.is_empty() && self.description != NOT_AVAILABLE
    }
}

/// A parsed page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub records: Vec<RepositoryRecord>,
    pub total_count: Option<u64>,
    /// Message GitHub sent instead of an `items` array, or a parse diagnostic.
    pub diagnostic: Option<String>,
}
