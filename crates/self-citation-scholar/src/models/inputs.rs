//! Validated analysis input.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Author ids are interpolated into URL paths, so only plain tokens are accepted.
static AUTHOR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,64}$").expect("valid author id regex"));

/// One or more author identifiers believed to denote the same person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorQuery {
    author_ids: Vec<String>,
}

impl AuthorQuery {
    /// Parse raw identifiers.
    ///
    /// Each entry may itself be a comma-separated list. Entries are trimmed and
    /// repeated identifiers are dropped (first occurrence kept).
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Input`] when no identifier remains or one is malformed.
    pub fn parse<I, S>(raw: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut author_ids = Vec::new();

        for entry in raw {
            for id in entry.as_ref().split(',').map(str::trim).filter(|id| !id.is_empty()) {
                if !AUTHOR_ID.is_match(id) {
                    return Err(AnalysisError::input(format!("malformed author id '{id}'")));
                }
                if seen.insert(id.to_string()) {
                    author_ids.push(id.to_string());
                } else {
                    tracing::warn!(author_id = id, "Ignoring repeated author id");
                }
            }
        }

        if author_ids.is_empty() {
            return Err(AnalysisError::input("at least one author id is required"));
        }

        Ok(Self { author_ids })
    }

    /// Query for a single author id.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Input`] when the id is blank or malformed.
    pub fn single(author_id: &str) -> AnalysisResult<Self> {
        Self::parse([author_id])
    }

    /// Identifiers in input order.
    #[must_use]
    pub fn author_ids(&self) -> &[String] {
        &self.author_ids
    }

    /// True when several identifiers will be merged.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.author_ids.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        let query = AuthorQuery::single(" 2262347 ").unwrap();
        assert_eq!(query.author_ids(), ["2262347"]);
        assert!(!query.is_merged());
    }

    #[test]
    fn test_parse_comma_separated_and_dedup() {
        let query = AuthorQuery::parse(["123, 456", "123", "789"]).unwrap();
        assert_eq!(query.author_ids(), ["123", "456", "789"]);
        assert!(query.is_merged());
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = AuthorQuery::parse(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::Input { .. }));

        let err = AuthorQuery::parse([" , ,"]).unwrap_err();
        assert!(matches!(err, AnalysisError::Input { .. }));
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        for bad in ["12/papers", "a b", "x?y=1", "id#frag"] {
            let err = AuthorQuery::single(bad).unwrap_err();
            assert!(err.to_string().contains("malformed"), "{bad} should be rejected");
        }
    }
}
