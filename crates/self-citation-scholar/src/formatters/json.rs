//! Compact JSON rendering of analysis reports.

use serde_json::{Value, json};

use crate::models::{LogicalAuthor, Publication, PublicationOrder, SelfCitationMethod};
use crate::pipeline::AnalysisReport;

/// Compact publication: counts only, without citing works.
#[must_use]
pub fn compact_publication(publication: &Publication) -> Value {
    let mut obj = json!({
        "id": publication.paper_id,
        "title": publication.title_or_default(),
        "year": publication.year,
        "citations": publication.citation_count,
        "selfCitationsMethod1": publication.self_citations(SelfCitationMethod::TargetAuthor),
        "selfCitationsMethod2": publication.self_citations(SelfCitationMethod::AuthorOverlap),
    });

    if let Some(venue) = &publication.venue {
        obj["venue"] = json!(venue);
    }

    if let Some(lookup) = publication.citation_lookup.filter(|l| l.is_degraded()) {
        obj["citationLookup"] = json!(lookup);
    }

    obj
}

/// Compact author card.
#[must_use]
pub fn compact_author(author: &LogicalAuthor) -> Value {
    let mut obj = json!({
        "id": author.author_id,
        "name": author.name_or_default(),
        "hIndex": author.h_index_value(),
        "citations": author.citation_count.unwrap_or(0),
        "papers": author.paper_count.unwrap_or(0),
    });

    if author.is_merged() {
        obj["authorIds"] = json!(author.author_ids);
    }

    if !author.alternate_names.is_empty() {
        obj["alternateNames"] = json!(author.alternate_names);
    }

    if !author.affiliations.is_empty() {
        obj["affiliations"] = json!(author.affiliations);
    }

    obj
}

/// Render a report as compact JSON with publications in `order`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_report_json(
    report: &AnalysisReport,
    order: PublicationOrder,
) -> serde_json::Result<String> {
    let intensity: serde_json::Map<String, Value> = SelfCitationMethod::ALL
        .iter()
        .map(|&m| (method_key(m).to_string(), json!(report.metrics.for_method(m).intensity())))
        .collect();

    let publications: Vec<Value> =
        report.publications_by(order).iter().map(compact_publication).collect();

    serde_json::to_string(&json!({
        "runId": report.run_id,
        "generatedAt": report.generated_at,
        "author": compact_author(&report.author),
        "metrics": report.metrics,
        "intensity": intensity,
        "coverage": report.coverage,
        "publications": publications,
    }))
}

const fn method_key(method: SelfCitationMethod) -> &'static str {
    match method {
        SelfCitationMethod::TargetAuthor => "method1",
        SelfCitationMethod::AuthorOverlap => "method2",
    }
}
