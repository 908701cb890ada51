//! Author data models: raw API records and the merged logical author.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// An author profile as returned by `GET /author/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    /// Unique Semantic Scholar author ID.
    pub author_id: String,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,

    /// Semantic Scholar profile URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Author's institutional affiliations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<String>,

    /// Author's homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,

    /// Total number of papers by this author.
    #[serde(default)]
    pub paper_count: Option<u32>,

    /// Total citation count across all papers.
    #[serde(default)]
    pub citation_count: Option<u32>,

    /// h-index as computed by Semantic Scholar.
    #[serde(default)]
    pub h_index: Option<u32>,
}

impl AuthorRecord {
    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> u32 {
        self.citation_count.unwrap_or(0)
    }

    /// Get paper count or 0 if not available.
    #[must_use]
    pub fn papers(&self) -> u32 {
        self.paper_count.unwrap_or(0)
    }
}

/// Minimal author reference (used in paper author lists).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID; frequently `null` in citing-paper data.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthorRef {
    /// Create a reference with both id and name.
    #[must_use]
    pub fn new(author_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { author_id: Some(author_id.into()), name: Some(name.into()) }
    }

    /// Create a reference that only carries a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { author_id: None, name: Some(name.into()) }
    }

    /// Author ID, treating an empty string as absent.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.author_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Get the author name or "Unknown".
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// One physical author assembled from one or more [`AuthorRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalAuthor {
    /// Composite key: the constituent ids joined with commas, in input order.
    pub author_id: String,

    /// Constituent identifiers in input order.
    pub author_ids: Vec<String>,

    /// Display name (the first record's name).
    #[serde(default)]
    pub name: Option<String>,

    /// Names of later records that differ from the display name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_names: Vec<String>,

    /// Profile URL of the first record that has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Union of affiliations, first-seen order.
    #[serde(default)]
    pub affiliations: Vec<String>,

    /// First non-empty homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Sum of the records' paper counts.
    #[serde(default)]
    pub paper_count: Option<u32>,

    /// Sum of the records' citation counts.
    #[serde(default)]
    pub citation_count: Option<u32>,

    /// h-index; recomputed from publications when records were merged.
    #[serde(default)]
    pub h_index: Option<u32>,
}

impl LogicalAuthor {
    /// True when more than one author record was merged.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.author_ids.len() > 1
    }

    /// Get the display name, falling back to "Unknown".
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Get the h-index or 0 if not available.
    #[must_use]
    pub fn h_index_value(&self) -> u32 {
        self.h_index.unwrap_or(0)
    }
}

impl From<AuthorRecord> for LogicalAuthor {
    fn from(record: AuthorRecord) -> Self {
        Self {
            author_ids: vec![record.author_id.clone()],
            author_id: record.author_id,
            name: record.name,
            alternate_names: Vec::new(),
            url: record.url,
            affiliations: record.affiliations,
            homepage: record.homepage,
            paper_count: record.paper_count,
            citation_count: record.citation_count,
            h_index: record.h_index,
        }
    }
}
