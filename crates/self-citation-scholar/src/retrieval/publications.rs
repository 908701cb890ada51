//! Paginated publication retrieval.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;

use crate::client::ScholarSource;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::Publication;

/// Fetches the complete publication list of one or more authors.
pub struct PublicationRetriever<'a> {
    source: &'a dyn ScholarSource,
    page_size: u32,
    cancel: Option<CancellationToken>,
}

impl<'a> PublicationRetriever<'a> {
    /// Create a retriever requesting `page_size` publications per page.
    #[must_use]
    pub fn new(source: &'a dyn ScholarSource, page_size: u32) -> Self {
        Self { source, page_size: page_size.max(1), cancel: None }
    }

    /// Check `token` before each author's page sequence.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fetch every publication of one author, page by page.
    ///
    /// Stops at the first page shorter than the page size.
    ///
    /// # Errors
    ///
    /// Any failed page aborts the whole listing; a 404 becomes
    /// [`AnalysisError::NotFound`].
    pub async fn fetch_all(&self, author_id: &str) -> AnalysisResult<Vec<Publication>> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(AnalysisError::Cancelled);
        }

        let mut publications = Vec::new();
        let mut offset = 0u32;

        loop {
            let page = self
                .source
                .author_papers(author_id, offset, self.page_size)
                .await
                .map_err(|e| AnalysisError::from_client("publications", author_id, e))?;

            let received = page.data.len();
            tracing::debug!(author_id, offset, received, "Fetched publication page");
            publications.extend(page.data);

            if received < self.page_size as usize {
                break;
            }
            offset += self.page_size;
        }

        tracing::info!(author_id, count = publications.len(), "Fetched publications");
        Ok(publications)
    }

    /// Fetch publications for several authors, dropping repeated paper ids.
    ///
    /// The first occurrence of a paper wins and keeps its position.
    ///
    /// # Errors
    ///
    /// Fails on the first author whose listing fails.
    pub async fn fetch_all_merged(
        &self,
        author_ids: &[String],
    ) -> AnalysisResult<Vec<Publication>> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        for author_id in author_ids {
            let publications = self.fetch_all(author_id).await?;
            let before = merged.len();
            merged.extend(
                publications.into_iter().filter(|p| seen.insert(p.paper_id.clone())),
            );
            tracing::debug!(author_id, added = merged.len() - before, "Merged publication list");
        }

        Ok(merged)
    }
}
