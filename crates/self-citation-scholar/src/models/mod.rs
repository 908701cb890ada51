//! Data models for Semantic Scholar entities and analysis results.
//!
//! All API models use `#[serde(default)]` for optional fields and
//! `#[serde(rename_all = "camelCase")]` to match API naming.

mod author;
mod enums;
mod inputs;
mod paper;

pub use author::{AuthorRecord, AuthorRef, LogicalAuthor};
pub use enums::{PublicationOrder, ResponseFormat, SelfCitationIntensity, SelfCitationMethod};
pub use inputs::AuthorQuery;
pub use paper::{
    AuthorPapersPage, CitationEdge, CitationLookup, CitationPage, CitingWork, MalformedReason,
    Publication,
};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an author list, skipping entries that are not author objects.
///
/// `null` or a non-array value yields an empty list.
pub(crate) fn lenient_authors<'de, D>(deserializer: D) -> Result<Vec<AuthorRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => author_refs(items),
        _ => Vec::new(),
    })
}

/// Keep the entries of a raw author array that parse as [`AuthorRef`].
pub(crate) fn author_refs(items: Vec<Value>) -> Vec<AuthorRef> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<AuthorRef>(item).ok())
        .collect()
}

/// Normalize an author name for comparison: trimmed and lowercased.
///
/// Names that are empty after trimming yield `None` and never match.
#[must_use]
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_lowercase()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jane Doe "), Some("jane doe".to_string()));
        assert_eq!(normalize_name("JANE DOE"), normalize_name("jane doe"));
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(""), None);
    }

    #[test]
    fn test_author_refs_skips_non_objects() {
        let refs = author_refs(vec![
            serde_json::json!({ "authorId": "A1", "name": "Jane Doe" }),
            Value::Null,
            serde_json::json!("Bob Lee"),
            serde_json::json!({ "authorId": 7 }),
        ]);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id(), Some("A1"));
    }
}
