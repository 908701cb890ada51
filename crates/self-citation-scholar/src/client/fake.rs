//! In-memory [`ScholarSource`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use super::ScholarSource;
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthorPapersPage, AuthorRecord, CitationPage, Publication};

/// Canned responses keyed by id; a status stands in for a failed request.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    authors: HashMap<String, Result<AuthorRecord, u16>>,
    papers: HashMap<String, Result<Vec<Publication>, u16>>,
    citations: HashMap<String, Result<Vec<Value>, u16>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn author(mut self, record: AuthorRecord) -> Self {
        self.authors.insert(record.author_id.clone(), Ok(record));
        self
    }

    pub(crate) fn author_status(mut self, author_id: &str, status: u16) -> Self {
        self.authors.insert(author_id.to_string(), Err(status));
        self
    }

    pub(crate) fn papers(mut self, author_id: &str, papers: Vec<Publication>) -> Self {
        self.papers.insert(author_id.to_string(), Ok(papers));
        self
    }

    pub(crate) fn papers_status(mut self, author_id: &str, status: u16) -> Self {
        self.papers.insert(author_id.to_string(), Err(status));
        self
    }

    /// Citation entries as they appear in the API's `data` array.
    pub(crate) fn citations(mut self, paper_id: &str, entries: Vec<Value>) -> Self {
        self.citations.insert(paper_id.to_string(), Ok(entries));
        self
    }

    pub(crate) fn citations_status(mut self, paper_id: &str, status: u16) -> Self {
        self.citations.insert(paper_id.to_string(), Err(status));
        self
    }

    /// Delay the citation lookup of one paper.
    pub(crate) fn delay(mut self, paper_id: &str, delay: Duration) -> Self {
        self.delays.insert(paper_id.to_string(), delay);
        self
    }

    /// Requests made so far, as `kind:id[:offset]`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn status_error(status: u16, resource: &str) -> ClientError {
    match status {
        404 => ClientError::not_found(resource),
        429 => ClientError::rate_limited(None),
        400 => ClientError::bad_request(resource),
        500..=599 => ClientError::server(status, resource),
        _ => ClientError::UnexpectedStatus { status, message: resource.to_string() },
    }
}

#[async_trait::async_trait]
impl ScholarSource for FakeSource {
    async fn author(&self, author_id: &str) -> ClientResult<AuthorRecord> {
        self.record(format!("author:{author_id}"));
        match self.authors.get(author_id) {
            Some(Ok(record)) => Ok(record.clone()),
            Some(Err(status)) => Err(status_error(*status, author_id)),
            None => Err(ClientError::not_found(author_id)),
        }
    }

    async fn author_papers(
        &self,
        author_id: &str,
        offset: u32,
        limit: u32,
    ) -> ClientResult<AuthorPapersPage> {
        self.record(format!("papers:{author_id}:{offset}"));
        let papers = match self.papers.get(author_id) {
            Some(Ok(papers)) => papers,
            Some(Err(status)) => return Err(status_error(*status, author_id)),
            None => return Err(ClientError::not_found(author_id)),
        };

        let data: Vec<Publication> =
            papers.iter().skip(offset as usize).take(limit as usize).cloned().collect();
        let end = offset + data.len() as u32;
        let next = ((end as usize) < papers.len()).then_some(end);

        Ok(AuthorPapersPage { offset, next, data })
    }

    async fn citations(&self, paper_id: &str, limit: u32) -> ClientResult<CitationPage> {
        self.record(format!("citations:{paper_id}"));
        if let Some(delay) = self.delays.get(paper_id) {
            tokio::time::sleep(*delay).await;
        }

        match self.citations.get(paper_id) {
            Some(Ok(entries)) => Ok(CitationPage {
                offset: 0,
                next: None,
                data: entries.iter().take(limit as usize).cloned().collect(),
            }),
            Some(Err(status)) => Err(status_error(*status, paper_id)),
            None => Ok(CitationPage::default()),
        }
    }
}
