//! The result of an analysis run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{AggregateMetrics, CoverageStats};
use crate::models::{AuthorRecord, LogicalAuthor, Publication, PublicationOrder};

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Identifier of the run, also attached to its log span.
    pub run_id: Uuid,

    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,

    /// The analyzed (possibly merged) author.
    pub author: LogicalAuthor,

    /// Enriched publications in retrieval order.
    pub publications: Vec<Publication>,

    /// Self-citation metrics.
    pub metrics: AggregateMetrics,

    /// Citing-works coverage.
    pub coverage: CoverageStats,

    /// The individual records, present only when several were merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_author_records: Option<Vec<AuthorRecord>>,
}

impl AnalysisReport {
    /// Publications sorted for display.
    #[must_use]
    pub fn publications_by(&self, order: PublicationOrder) -> Vec<Publication> {
        let mut sorted = self.publications.clone();
        order.sort(&mut sorted);
        sorted
    }

    /// True when the merged records disagree on the author's name.
    #[must_use]
    pub fn has_name_mismatch(&self) -> bool {
        !self.author.alternate_names.is_empty()
    }
}
