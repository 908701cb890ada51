//! The analysis pipeline.
//!
//! [`SelfCitationAnalyzer::analyze`] drives one run end to end:
//!
//! 1. Look up every author record, one at a time.
//! 2. Merge them into a [`LogicalAuthor`](crate::models::LogicalAuthor).
//! 3. List and deduplicate their publications.
//! 4. Fetch and classify the citing works of each publication in batches.
//! 5. Aggregate metrics into an [`AnalysisReport`].
//!
//! Runs share nothing except the source. Each run is wrapped in an
//! `analysis` tracing span carrying its `run_id`.

mod progress;
mod report;
mod stage;

pub use progress::{NoopObserver, ProgressObserver};
pub use report::AnalysisReport;
pub use stage::AnalysisStage;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::{AggregateMetrics, CoverageStats, classify, h_index, merge_authors};
use crate::client::ScholarSource;
use crate::config::PipelineConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{AuthorQuery, AuthorRecord, Publication};
use crate::retrieval::{CitationRetriever, CitingWorksOutcome, PublicationRetriever};
use stage::StageTracker;

/// Runs self-citation analyses against a [`ScholarSource`].
#[derive(Clone)]
pub struct SelfCitationAnalyzer {
    source: Arc<dyn ScholarSource>,
    config: PipelineConfig,
}

impl SelfCitationAnalyzer {
    /// Create an analyzer.
    #[must_use]
    pub fn new(source: Arc<dyn ScholarSource>, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    /// Pipeline settings in use.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze the authors in `query` as one person.
    ///
    /// # Errors
    ///
    /// Fails without a partial report if an author or publication list cannot
    /// be retrieved, or if `cancel` fires. Citation lookups never fail the run.
    pub async fn analyze(
        &self,
        query: &AuthorQuery,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> AnalysisResult<AnalysisReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "analysis",
            %run_id,
            author_ids = %query.author_ids().join(",")
        );

        async {
            let mut tracker = StageTracker::new(observer);
            match self.run(run_id, query, &mut tracker, observer, cancel).await {
                Ok(report) => Ok(report),
                Err(e) => {
                    tracing::error!(stage = %tracker.stage(), error = %e, "Analysis failed");
                    tracker.advance(AnalysisStage::Failed);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        run_id: Uuid,
        query: &AuthorQuery,
        tracker: &mut StageTracker<'_>,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> AnalysisResult<AnalysisReport> {
        tracker.advance(AnalysisStage::FetchingAuthors);
        let records = self.fetch_authors(query.author_ids(), cancel).await?;
        let mut author = merge_authors(&records)?;

        tracker.advance(AnalysisStage::FetchingPublications);
        let publications = PublicationRetriever::new(self.source.as_ref(), self.config.page_size)
            .with_cancellation(cancel.clone())
            .fetch_all_merged(&author.author_ids)
            .await?;

        tracker.advance(AnalysisStage::AnalyzingCitations);
        let (publications, discarded) =
            self.analyze_citations(publications, &author.author_ids, observer, cancel).await?;

        if author.is_merged() {
            author.h_index = Some(h_index(publications.iter().map(|p| p.citation_count)));
        }

        tracker.advance(AnalysisStage::Aggregating);
        let metrics = AggregateMetrics::compute(&publications);
        let coverage = CoverageStats::compute(&publications, discarded);

        tracing::info!(
            total_papers = metrics.total_papers,
            self_citations_method1 = metrics.method1.self_citations,
            self_citations_method2 = metrics.method2.self_citations,
            coverage_rate = coverage.coverage_rate,
            "Analysis complete"
        );
        tracker.advance(AnalysisStage::Done);

        Ok(AnalysisReport {
            run_id,
            generated_at: Utc::now(),
            original_author_records: author.is_merged().then_some(records),
            author,
            publications,
            metrics,
            coverage,
        })
    }

    /// Look up each author record in order, pausing between requests.
    async fn fetch_authors(
        &self,
        author_ids: &[String],
        cancel: &CancellationToken,
    ) -> AnalysisResult<Vec<AuthorRecord>> {
        let mut records = Vec::with_capacity(author_ids.len());

        for (i, author_id) in author_ids.iter().enumerate() {
            if i > 0 {
                pause(self.config.author_pause, cancel).await?;
            }
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }

            let record = self
                .source
                .author(author_id)
                .await
                .map_err(|e| AnalysisError::from_client("author", author_id.as_str(), e))?;
            tracing::info!(
                author_id = %author_id,
                name = record.name_or_default(),
                "Fetched author"
            );
            records.push(record);
        }

        Ok(records)
    }

    /// Enrich every publication with its citing works and self-citation counts.
    ///
    /// Returns the publications in their original order plus the number of
    /// discarded citing-work entries.
    async fn analyze_citations(
        &self,
        publications: Vec<Publication>,
        target_ids: &[String],
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> AnalysisResult<(Vec<Publication>, u64)> {
        let total = publications.len();
        let batch_size = self.config.batch_size.max(1);
        let retriever = CitationRetriever::new(self.source.as_ref(), self.config.citation_limit);

        let mut slots: Vec<Option<Publication>> = vec![None; total];
        let mut pending = publications.into_iter().enumerate();
        let mut completed = 0usize;
        let mut discarded = 0u64;

        loop {
            let batch: Vec<_> = pending.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }
            if completed > 0 {
                pause(self.config.batch_pause, cancel).await?;
            }
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }

            let mut in_flight: FuturesUnordered<_> = batch
                .into_iter()
                .map(|(index, publication)| {
                    let retriever = &retriever;
                    async move {
                        let outcome = retriever.fetch_citing_works(&publication.paper_id).await;
                        (index, publication, outcome)
                    }
                })
                .collect();

            while let Some((index, publication, outcome)) = in_flight.next().await {
                discarded += outcome.discarded as u64;
                slots[index] = Some(enrich(publication, outcome, target_ids));
                completed += 1;
                tracing::info!(completed, total, "Analyzed citations");
                observer.on_progress(completed, total);
            }
        }

        Ok((slots.into_iter().flatten().collect(), discarded))
    }
}

impl std::fmt::Debug for SelfCitationAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelfCitationAnalyzer").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Attach citing works, lookup outcome and both self-citation counts.
fn enrich(
    mut publication: Publication,
    outcome: CitingWorksOutcome,
    target_ids: &[String],
) -> Publication {
    let (mut method1, mut method2) = (0u32, 0u32);
    for work in &outcome.works {
        let verdict = classify(&publication, work, target_ids);
        method1 += u32::from(verdict.method1);
        method2 += u32::from(verdict.method2);
    }

    tracing::debug!(
        paper_id = %publication.paper_id,
        citing_works = outcome.works.len(),
        method1,
        method2,
        "Classified citing works"
    );

    publication.method1_self_citation_count = Some(method1);
    publication.method2_self_citation_count = Some(method2);
    publication.citing_works = Some(outcome.works);
    publication.citation_lookup = Some(outcome.lookup);
    publication
}

/// Sleep for `duration` unless the run is cancelled first.
async fn pause(duration: Duration, cancel: &CancellationToken) -> AnalysisResult<()> {
    if duration.is_zero() {
        return Ok(());
    }
    tokio::select! {
        () = cancel.cancelled() => Err(AnalysisError::Cancelled),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}
