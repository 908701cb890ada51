//! Citing-work retrieval with lenient degradation.

use crate::client::ScholarSource;
use crate::models::{CitationLookup, CitingWork};

/// Result of one citing-works lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitingWorksOutcome {
    /// Valid citing works, in response order.
    pub works: Vec<CitingWork>,
    /// Entries dropped by validation.
    pub discarded: usize,
    /// How the lookup went.
    pub lookup: CitationLookup,
}

impl CitingWorksOutcome {
    fn empty(lookup: CitationLookup) -> Self {
        Self { works: Vec::new(), discarded: 0, lookup }
    }
}

/// Fetches the works citing a publication.
///
/// Failures never propagate: a publication whose lookup fails is analyzed
/// with no citing works and the failure is recorded in [`CitationLookup`].
pub struct CitationRetriever<'a> {
    source: &'a dyn ScholarSource,
    limit: u32,
}

impl<'a> CitationRetriever<'a> {
    /// Create a retriever requesting at most `limit` citing works per paper.
    #[must_use]
    pub fn new(source: &'a dyn ScholarSource, limit: u32) -> Self {
        Self { source, limit }
    }

    /// Fetch and validate the citing works of `paper_id`.
    pub async fn fetch_citing_works(&self, paper_id: &str) -> CitingWorksOutcome {
        let page = match self.source.citations(paper_id, self.limit).await {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    paper_id,
                    "Paper not found in citation graph, counting no citations"
                );
                return CitingWorksOutcome::empty(CitationLookup::NotFound);
            }
            Err(e) => {
                let http_status = e.status();
                tracing::error!(
                    paper_id,
                    status = ?http_status,
                    error = %e,
                    "Citation lookup failed, counting no citations for this paper"
                );
                return CitingWorksOutcome::empty(CitationLookup::Failed { http_status });
            }
        };

        let mut works = Vec::with_capacity(page.data.len());
        let mut discarded = 0;
        for (index, entry) in page.into_citing_works().enumerate() {
            match entry {
                Ok(work) => works.push(work),
                Err(reason) => {
                    discarded += 1;
                    tracing::debug!(paper_id, index, %reason, "Discarding malformed citing work");
                }
            }
        }

        CitingWorksOutcome { works, discarded, lookup: CitationLookup::Complete }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::*;
    use crate::client::fake::FakeSource;

    fn edge(paper_id: &str, authors: serde_json::Value) -> serde_json::Value {
        json!({ "citingPaper": { "paperId": paper_id, "title": "Citing", "authors": authors } })
    }

    #[tokio::test]
    #[traced_test]
    async fn test_malformed_entries_are_filtered() {
        let source = FakeSource::new().citations(
            "P1",
            vec![
                edge("C1", json!([{ "authorId": "A1", "name": "Jane Doe" }])),
                edge("C2", json!(null)),
                json!({ "citingPaper": null }),
                edge("", json!([])),
                edge("C3", json!([null, { "authorId": null, "name": "Bob" }])),
            ],
        );

        let outcome = CitationRetriever::new(&source, 1000).fetch_citing_works("P1").await;
        assert_eq!(outcome.lookup, CitationLookup::Complete);
        assert_eq!(outcome.discarded, 3);
        let ids: Vec<_> = outcome.works.iter().map(|w| w.paper_id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
        assert_eq!(outcome.works[1].authors.len(), 1);
        assert!(logs_contain("Discarding malformed citing work"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_not_found_degrades_to_empty() {
        let source = FakeSource::new().citations_status("P1", 404);
        let outcome = CitationRetriever::new(&source, 1000).fetch_citing_works("P1").await;

        assert!(outcome.works.is_empty());
        assert_eq!(outcome.lookup, CitationLookup::NotFound);
        assert!(logs_contain("Paper not found in citation graph"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failure_degrades_with_status() {
        let source = FakeSource::new()
            .citations_status("P1", 503)
            .citations_status("P2", 429);
        let retriever = CitationRetriever::new(&source, 1000);

        let outcome = retriever.fetch_citing_works("P1").await;
        assert!(outcome.works.is_empty());
        assert_eq!(outcome.lookup, CitationLookup::Failed { http_status: Some(503) });

        let outcome = retriever.fetch_citing_works("P2").await;
        assert_eq!(outcome.lookup, CitationLookup::Failed { http_status: Some(429) });
        assert!(logs_contain("Citation lookup failed"));
    }

    #[tokio::test]
    async fn test_limit_is_forwarded() {
        let entries = (0..5).map(|i| edge(&format!("C{i}"), json!([]))).collect();
        let source = FakeSource::new().citations("P1", entries);

        let outcome = CitationRetriever::new(&source, 3).fetch_citing_works("P1").await;
        assert_eq!(outcome.works.len(), 3);
    }
}
