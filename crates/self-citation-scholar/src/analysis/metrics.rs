//! Bibliometric aggregation: H-index variants, self-citation rates, coverage.

use serde::{Deserialize, Serialize};

use crate::models::{Publication, SelfCitationIntensity, SelfCitationMethod};

/// Largest `h` such that `h` of the counts are each at least `h`.
///
/// Ties and zeros take part in the ranking; no counts gives 0.
#[must_use]
pub fn h_index<I>(counts: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let mut sorted: Vec<u32> = counts.into_iter().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().enumerate().take_while(|&(rank, &count)| count as usize > rank).count() as u32
}

/// Metrics for one self-citation method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMetrics {
    /// Sum of self-citations over all publications.
    pub self_citations: u32,
    /// Publications with at least one self-citation.
    pub papers_with_self_citations: u32,
    /// Self-citations per publication.
    pub average_self_citations_per_paper: f64,
    /// Self-citations as a percentage of raw citations.
    pub self_citation_rate: f64,
    /// H-index over per-publication self-citation counts.
    pub self_citation_h_index: u32,
    /// H-index over citations with self-citations removed.
    pub h_index_without_self_citations: u32,
}

impl MethodMetrics {
    /// Compute the metrics of `method` over enriched publications.
    #[must_use]
    pub fn compute(publications: &[Publication], method: SelfCitationMethod) -> Self {
        let total_papers = publications.len();
        let total_citations = total_citations(publications);

        let self_citations: u32 = publications.iter().map(|p| p.self_citations(method)).sum();
        let papers_with_self_citations =
            publications.iter().filter(|p| p.self_citations(method) > 0).count() as u32;

        Self {
            self_citations,
            papers_with_self_citations,
            average_self_citations_per_paper: ratio(self_citations as f64, total_papers as f64),
            self_citation_rate: 100.0 * ratio(self_citations as f64, total_citations as f64),
            self_citation_h_index: h_index(publications.iter().map(|p| p.self_citations(method))),
            h_index_without_self_citations: h_index(
                publications.iter().map(|p| p.citations_without_self(method)),
            ),
        }
    }

    /// Intensity band of the self-citation rate.
    #[must_use]
    pub fn intensity(&self) -> SelfCitationIntensity {
        SelfCitationIntensity::from_rate(self.self_citation_rate)
    }

    /// Percentage of publications with at least one self-citation.
    #[must_use]
    pub fn share_of_papers_with_self_citations(&self, total_papers: u32) -> f64 {
        100.0 * ratio(self.papers_with_self_citations as f64, total_papers as f64)
    }
}

/// Snapshot of self-citation metrics over a finished publication set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    /// Number of analyzed publications.
    pub total_papers: u32,
    /// Method 1 (target author) metrics.
    pub method1: MethodMetrics,
    /// Method 2 (author overlap) metrics.
    pub method2: MethodMetrics,
}

impl AggregateMetrics {
    /// Aggregate both methods.
    #[must_use]
    pub fn compute(publications: &[Publication]) -> Self {
        Self {
            total_papers: publications.len() as u32,
            method1: MethodMetrics::compute(publications, SelfCitationMethod::TargetAuthor),
            method2: MethodMetrics::compute(publications, SelfCitationMethod::AuthorOverlap),
        }
    }

    /// Metrics of one method.
    #[must_use]
    pub const fn for_method(&self, method: SelfCitationMethod) -> &MethodMetrics {
        match method {
            SelfCitationMethod::TargetAuthor => &self.method1,
            SelfCitationMethod::AuthorOverlap => &self.method2,
        }
    }
}

/// How much of the raw citation count the citing-works lookups actually covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStats {
    /// Sum of raw citation counts.
    pub total_citations: u64,
    /// Citing works retrieved and classified.
    pub citing_works_fetched: u64,
    /// Citing-work entries discarded as malformed.
    pub citing_works_discarded: u64,
    /// Publications unknown to the citation graph.
    pub lookups_not_found: u32,
    /// Publications whose lookup failed.
    pub lookups_failed: u32,
    /// Fetched citing works as a percentage of raw citations.
    pub coverage_rate: f64,
}

impl CoverageStats {
    /// Tally coverage over enriched publications.
    ///
    /// `discarded` comes from the retrieval step since discarded entries are not kept.
    #[must_use]
    pub fn compute(publications: &[Publication], discarded: u64) -> Self {
        use crate::models::CitationLookup;

        let total_citations = total_citations(publications);
        let citing_works_fetched =
            publications.iter().map(|p| p.citing_works_fetched() as u64).sum::<u64>();

        let mut lookups_not_found = 0;
        let mut lookups_failed = 0;
        for lookup in publications.iter().filter_map(|p| p.citation_lookup) {
            match lookup {
                CitationLookup::Complete => {}
                CitationLookup::NotFound => lookups_not_found += 1,
                CitationLookup::Failed { .. } => lookups_failed += 1,
            }
        }

        Self {
            total_citations,
            citing_works_fetched,
            citing_works_discarded: discarded,
            lookups_not_found,
            lookups_failed,
            coverage_rate: 100.0 * ratio(citing_works_fetched as f64, total_citations as f64),
        }
    }
}

fn total_citations(publications: &[Publication]) -> u64 {
    publications.iter().map(|p| u64::from(p.citation_count)).sum()
}

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}
