//! Self-citation classification.
//!
//! Two independent rules decide whether a citing work is a self-citation of a
//! publication:
//!
//! - **Method 1** ([`is_target_author_self_citation`]): the designated author
//!   of the publication also appears on the citing work, matched by id, or by
//!   normalized name when the citing author has no id.
//! - **Method 2** ([`is_author_overlap_self_citation`]): any author of the
//!   publication appears on the citing work, matched by normalized name or by
//!   a shared id.
//!
//! Method 1 implies method 2, so method-2 counts are never below method-1 counts.

use serde::{Deserialize, Serialize};

use crate::models::{AuthorRef, CitingWork, Publication, normalize_name};

/// Verdicts of both methods for one (publication, citing work) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfCitationVerdict {
    /// Method 1: target author present on the citing work.
    pub method1: bool,
    /// Method 2: any author overlap.
    pub method2: bool,
}

/// Method 1 for a single target author id.
#[must_use]
pub fn is_target_author_self_citation(
    publication: &Publication,
    citing: &CitingWork,
    target_author_id: &str,
) -> bool {
    let Some(target) = publication.authors.iter().find(|a| a.id() == Some(target_author_id))
    else {
        return false;
    };
    let target_name = target.name.as_deref().and_then(normalize_name);

    citing.authors.iter().any(|author| match author.id() {
        Some(id) => id == target_author_id,
        None => target_name.is_some() && author_name(author) == target_name,
    })
}

/// Method 1 for a merged author: true if any constituent id matches.
#[must_use]
pub fn is_self_citation_for_any(
    publication: &Publication,
    citing: &CitingWork,
    target_author_ids: &[String],
) -> bool {
    target_author_ids.iter().any(|id| is_target_author_self_citation(publication, citing, id))
}

/// Method 2: any author of the publication also wrote the citing work.
///
/// Besides the name-only overlap rule, two authors carrying the same non-empty
/// id also overlap. Without that id clause a method-1 match by id under
/// differing names would not count here, and method-2 counts could fall
/// below method-1 counts.
#[must_use]
pub fn is_author_overlap_self_citation(publication: &Publication, citing: &CitingWork) -> bool {
    publication.authors.iter().any(|cited| {
        let cited_name = author_name(cited);
        citing.authors.iter().any(|other| {
            (cited_name.is_some() && author_name(other) == cited_name)
                || matches!((cited.id(), other.id()), (Some(a), Some(b)) if a == b)
        })
    })
}

/// Classify one citing work under both methods.
///
/// With no target ids method 1 is always false.
#[must_use]
pub fn classify(
    publication: &Publication,
    citing: &CitingWork,
    target_author_ids: &[String],
) -> SelfCitationVerdict {
    SelfCitationVerdict {
        method1: is_self_citation_for_any(publication, citing, target_author_ids),
        method2: is_author_overlap_self_citation(publication, citing),
    }
}

fn author_name(author: &AuthorRef) -> Option<String> {
    author.name.as_deref().and_then(normalize_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(authors: Vec<AuthorRef>) -> Publication {
        Publication { paper_id: "p1".to_string(), authors, ..Default::default() }
    }

    fn citing(authors: Vec<AuthorRef>) -> CitingWork {
        CitingWork { paper_id: "c1".to_string(), authors, ..Default::default() }
    }

    fn jane() -> AuthorRef {
        AuthorRef::new("A1", "Jane Doe")
    }

    #[test]
    fn test_method1_matches_by_id() {
        let paper = publication(vec![jane()]);
        let work = citing(vec![AuthorRef { author_id: Some("A1".to_string()), name: None }]);
        assert!(is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method1_falls_back_to_name_without_id() {
        let paper = publication(vec![jane()]);
        let work = citing(vec![AuthorRef::named("  jane doe ")]);
        assert!(is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method1_rejects_other_author() {
        let paper = publication(vec![jane()]);
        let work = citing(vec![AuthorRef::new("A2", "John Smith")]);
        assert!(!is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method1_id_mismatch_is_not_overridden_by_name() {
        let paper = publication(vec![jane()]);
        let work = citing(vec![AuthorRef::new("A9", "Jane Doe")]);
        assert!(!is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method1_requires_target_on_publication() {
        let paper = publication(vec![AuthorRef::new("A2", "Bob Lee")]);
        let work = citing(vec![jane()]);
        assert!(!is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method1_blank_target_name_never_matches_by_name() {
        let paper = publication(vec![AuthorRef::new("A1", " ")]);
        let work = citing(vec![AuthorRef::named(" ")]);
        assert!(!is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method1_or_across_identifiers() {
        let paper = publication(vec![AuthorRef::new("A2", "J. Doe")]);
        let work = citing(vec![AuthorRef::new("A2", "J. Doe")]);
        let ids = vec!["A1".to_string(), "A2".to_string()];
        assert!(is_self_citation_for_any(&paper, &work, &ids));
        assert!(!is_self_citation_for_any(&paper, &work, &ids[..1]));
    }

    #[test]
    fn test_method2_coauthor_overlap_without_target() {
        let paper = publication(vec![
            AuthorRef { author_id: None, name: Some("Jane Doe".to_string()) },
            AuthorRef::named("Bob Lee"),
        ]);
        let work = citing(vec![AuthorRef::named("bob lee")]);

        assert!(is_author_overlap_self_citation(&paper, &work));
        assert!(!is_target_author_self_citation(&paper, &work, "A1"));
    }

    #[test]
    fn test_method2_matches_shared_id_with_different_spelling() {
        let paper = publication(vec![jane()]);
        let work = citing(vec![AuthorRef::new("A1", "J. Doe")]);
        assert!(is_target_author_self_citation(&paper, &work, "A1"));
        assert!(is_author_overlap_self_citation(&paper, &work));
    }

    #[test]
    fn test_empty_author_lists_are_false() {
        let paper = publication(vec![]);
        let work = citing(vec![jane()]);
        assert_eq!(classify(&paper, &work, &["A1".to_string()]), SelfCitationVerdict::default());

        let paper = publication(vec![jane()]);
        let work = citing(vec![]);
        assert_eq!(classify(&paper, &work, &["A1".to_string()]), SelfCitationVerdict::default());
    }

    #[test]
    fn test_classify_without_targets() {
        let paper = publication(vec![jane()]);
        let work = citing(vec![jane()]);
        let verdict = classify(&paper, &work, &[]);
        assert!(!verdict.method1);
        assert!(verdict.method2);
    }
}
