//! Markdown rendering of analysis reports.

use std::fmt::Write as _;

use crate::analysis::{CoverageStats, MethodMetrics};
use crate::models::{LogicalAuthor, Publication, PublicationOrder, SelfCitationMethod};
use crate::pipeline::AnalysisReport;

const MAX_TITLE_CHARS: usize = 60;

/// Render a full report: author card, metrics per method, coverage and the
/// publication table in `order`.
#[must_use]
pub fn format_report_markdown(report: &AnalysisReport, order: PublicationOrder) -> String {
    let mut output = format!("# Self-Citation Analysis: {}\n\n", report.author.name_or_default());

    output.push_str(&format_author_markdown(&report.author));

    let total_papers = report.metrics.total_papers;
    for method in SelfCitationMethod::ALL {
        output.push_str(&format_method_markdown(
            method,
            report.metrics.for_method(method),
            total_papers,
        ));
    }

    output.push_str(&format_coverage_markdown(&report.coverage));
    output.push_str(&format_publications_markdown(&report.publications_by(order)));

    let _ = write!(
        output,
        "\n*Run {} generated {}*\n",
        report.run_id,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    output
}

/// Author summary, with a warning when merged records carry different names.
#[must_use]
pub fn format_author_markdown(author: &LogicalAuthor) -> String {
    let mut output = format!(
        "**Author ID:** {}\n\
         **Papers:** {} | **Citations:** {} | **h-index:** {}\n",
        author.author_id,
        author.paper_count.unwrap_or(0),
        author.citation_count.unwrap_or(0),
        author.h_index_value()
    );

    if !author.affiliations.is_empty() {
        let _ = writeln!(output, "**Affiliations:** {}", author.affiliations.join(", "));
    }

    if let Some(homepage) = &author.homepage {
        let _ = writeln!(output, "**Homepage:** {homepage}");
    }

    if author.is_merged() {
        let _ = writeln!(
            output,
            "\n*Merged {} author profiles; h-index recomputed from the combined publications.*",
            author.author_ids.len()
        );
    }

    if !author.alternate_names.is_empty() {
        let _ = writeln!(
            output,
            "\n⚠️ **Names differ across merged profiles:** {} vs {}. \
             Check that these profiles belong to the same person.",
            author.name_or_default(),
            author.alternate_names.join(", ")
        );
    }

    output.push('\n');
    output
}

/// Metrics block of one method.
#[must_use]
pub fn format_method_markdown(
    method: SelfCitationMethod,
    metrics: &MethodMetrics,
    total_papers: u32,
) -> String {
    let intensity = metrics.intensity();
    format!(
        "## {}\n\
         - Self-citations: {} ({:.2}% of citations, {})\n\
         - Papers with self-citations: {} of {} ({:.1}%)\n\
         - Average self-citations per paper: {:.2}\n\
         - Self-citation h-index: {}\n\
         - h-index without self-citations: {}\n\n\
         > {}\n\n",
        method.label(),
        metrics.self_citations,
        metrics.self_citation_rate,
        intensity,
        metrics.papers_with_self_citations,
        total_papers,
        metrics.share_of_papers_with_self_citations(total_papers),
        metrics.average_self_citations_per_paper,
        metrics.self_citation_h_index,
        metrics.h_index_without_self_citations,
        intensity.description()
    )
}

/// How much of the raw citation count was actually analyzed.
#[must_use]
pub fn format_coverage_markdown(coverage: &CoverageStats) -> String {
    let mut output = format!(
        "## Coverage\n\
         - Citing works analyzed: {} of {} citations ({:.1}%)\n",
        coverage.citing_works_fetched, coverage.total_citations, coverage.coverage_rate
    );

    if coverage.citing_works_discarded > 0 {
        let _ = writeln!(
            output,
            "- Malformed citing works skipped: {}",
            coverage.citing_works_discarded
        );
    }

    if coverage.lookups_not_found > 0 || coverage.lookups_failed > 0 {
        let _ = writeln!(
            output,
            "- ⚠️ Citation lookups not found: {} | failed: {} \
             (counts for those papers are understated)",
            coverage.lookups_not_found,
            coverage.lookups_failed
        );
    }

    output.push('\n');
    output
}

/// Publication table with raw and self-citation counts.
#[must_use]
pub fn format_publications_markdown(publications: &[Publication]) -> String {
    if publications.is_empty() {
        return "No publications found.\n".to_string();
    }

    let mut output = format!(
        "## Publications ({})\n\n\
         | # | Title | Year | Refs | Citations | Self (target) | Self (overlap) | Rate |\n\
         |---|-------|------|------|-----------|---------------|----------------|------|\n",
        publications.len()
    );

    for (i, publication) in publications.iter().enumerate() {
        let year = publication.year.map_or_else(|| "-".to_string(), |y| y.to_string());
        let lookup = if publication.citation_lookup.is_some_and(|l| l.is_degraded()) {
            " ⚠️"
        } else {
            ""
        };
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {}{} | {} | {} | {:.1}% |",
            i + 1,
            table_title(publication.title_or_default()),
            year,
            publication.reference_count,
            publication.citation_count,
            lookup,
            publication.self_citations(SelfCitationMethod::TargetAuthor),
            publication.self_citations(SelfCitationMethod::AuthorOverlap),
            publication.self_citation_rate(SelfCitationMethod::TargetAuthor)
        );
    }

    output
}

/// Shorten a title and keep it from breaking the table.
fn table_title(title: &str) -> String {
    let escaped = title.replace('|', "\\|");
    if escaped.chars().count() > MAX_TITLE_CHARS {
        let short: String = escaped.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", short.trim_end())
    } else {
        escaped
    }
}
