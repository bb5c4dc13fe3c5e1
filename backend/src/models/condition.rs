//! Per-request filter for listing pets.

use serde::{Deserialize, Serialize};

/// Number of rows returned when the caller does not specify a limit.
pub const DEFAULT_LIMIT: i64 = 100;

/// Filter applied when listing pets.
///
/// `tags` matches the stored tag by exact equality against any member of the
/// set. An empty set means "no tag filter", not "no results".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl QueryCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Tags to filter on, or `None` when no tag clause applies.
    pub fn tag_filter(&self) -> Option<&[String]> {
        self.tags.as_deref().filter(|tags| !tags.is_empty())
    }

    /// Effective row limit (`DEFAULT_LIMIT` when unset).
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
