//! Merging several author records into one logical author.

use std::collections::HashSet;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{AuthorRecord, LogicalAuthor, normalize_name};

/// Merge author records, in input order, into one [`LogicalAuthor`].
///
/// A single record passes through unchanged. For several records the
/// composite id joins the ids with commas, counts are summed, affiliations
/// are unioned, and the h-index is left at 0 for the caller to recompute
/// from the merged publications. Names that differ from the first record's
/// are reported in `alternate_names`.
///
/// # Errors
///
/// Returns [`AnalysisError::Input`] for an empty slice.
pub fn merge_authors(records: &[AuthorRecord]) -> AnalysisResult<LogicalAuthor> {
    let (first, rest) = records
        .split_first()
        .ok_or_else(|| AnalysisError::input("cannot merge an empty list of authors"))?;

    if rest.is_empty() {
        return Ok(LogicalAuthor::from(first.clone()));
    }

    let author_ids: Vec<String> = records.iter().map(|r| r.author_id.clone()).collect();

    let mut seen_affiliations = HashSet::new();
    let affiliations = records
        .iter()
        .flat_map(|r| r.affiliations.iter())
        .filter(|a| seen_affiliations.insert(a.as_str()))
        .cloned()
        .collect();

    let display = first.name.as_deref().and_then(normalize_name);
    let mut seen_names: HashSet<String> = display.iter().cloned().collect();
    let alternate_names = rest
        .iter()
        .filter_map(|r| {
            let name = r.name.as_deref()?;
            let key = normalize_name(name)?;
            seen_names.insert(key).then(|| name.trim().to_string())
        })
        .collect::<Vec<_>>();

    if !alternate_names.is_empty() {
        tracing::warn!(
            display_name = first.name_or_default(),
            alternate_names = ?alternate_names,
            "Merged author records carry different names"
        );
    }

    Ok(LogicalAuthor {
        author_id: author_ids.join(","),
        author_ids,
        name: first.name.clone(),
        alternate_names,
        url: first_non_empty(records, |r| r.url.as_deref()),
        affiliations,
        homepage: first_non_empty(records, |r| r.homepage.as_deref()),
        paper_count: Some(saturating_total(records, AuthorRecord::papers)),
        citation_count: Some(saturating_total(records, AuthorRecord::citations)),
        h_index: Some(0),
    })
}

fn saturating_total(records: &[AuthorRecord], count: impl Fn(&AuthorRecord) -> u32) -> u32 {
    records.iter().map(count).fold(0, u32::saturating_add)
}

fn first_non_empty<'a>(
    records: &'a [AuthorRecord],
    field: impl Fn(&'a AuthorRecord) -> Option<&'a str>,
) -> Option<String> {
    records.iter().filter_map(field).find(|v| !v.trim().is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> AuthorRecord {
        AuthorRecord {
            author_id: id.to_string(),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = merge_authors(&[]).unwrap_err();
        assert!(matches!(err, AnalysisError::Input { .. }));
    }

    #[test]
    fn test_single_record_is_identity() {
        let mut single = record("42", "Jane Doe");
        single.affiliations = vec!["MIT".to_string()];
        single.citation_count = Some(120);
        single.h_index = Some(7);

        let merged = merge_authors(std::slice::from_ref(&single)).unwrap();
        assert_eq!(merged, LogicalAuthor::from(single));
        assert_eq!(merged.author_id, "42");
        assert_eq!(merged.h_index, Some(7));
    }

    #[test]
    fn test_merge_sums_and_unions() {
        let mut a = record("1", "Jane Doe");
        a.affiliations = vec!["MIT".to_string(), "CMU".to_string()];
        a.paper_count = Some(10);
        a.citation_count = Some(100);
        a.h_index = Some(5);

        let mut b = record("2", "jane doe ");
        b.affiliations = vec!["CMU".to_string(), "ETH".to_string()];
        b.homepage = Some("https://jane.example".to_string());
        b.paper_count = Some(3);
        b.h_index = Some(2);

        let merged = merge_authors(&[a, b]).unwrap();
        assert_eq!(merged.author_id, "1,2");
        assert_eq!(merged.author_ids, vec!["1", "2"]);
        assert_eq!(merged.name.as_deref(), Some("Jane Doe"));
        assert!(merged.alternate_names.is_empty());
        assert_eq!(merged.affiliations, vec!["MIT", "CMU", "ETH"]);
        assert_eq!(merged.homepage.as_deref(), Some("https://jane.example"));
        assert_eq!(merged.paper_count, Some(13));
        assert_eq!(merged.citation_count, Some(100));
        assert_eq!(merged.h_index, Some(0));
        assert!(merged.is_merged());
    }

    #[test]
    fn test_merge_counts_saturate() {
        let mut a = record("1", "Jane Doe");
        a.citation_count = Some(u32::MAX - 1);
        a.paper_count = Some(u32::MAX);
        let mut b = record("2", "Jane Doe");
        b.citation_count = Some(5);
        b.paper_count = Some(1);

        let merged = merge_authors(&[a, b]).unwrap();
        assert_eq!(merged.citation_count, Some(u32::MAX));
        assert_eq!(merged.paper_count, Some(u32::MAX));
    }

    #[test]
    fn test_merge_reports_differing_names() {
        let merged = merge_authors(&[
            record("1", "Jane Doe"),
            record("2", "J. Doe"),
            record("3", "Jane Smith"),
            record("4", "j. doe"),
        ])
        .unwrap();
        assert_eq!(merged.name.as_deref(), Some("Jane Doe"));
        assert_eq!(merged.alternate_names, vec!["J. Doe", "Jane Smith"]);
    }
}
