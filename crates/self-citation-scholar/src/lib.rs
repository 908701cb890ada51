//! Self-Citation Scholar
//!
//! Measures how much of an author's citation record comes from their own
//! later work, using the Semantic Scholar Graph API.
//!
//! # Features
//!
//! - **Two detection methods**: target-author presence and author overlap
//! - **Profile merging**: analyze several author ids as one person
//! - **Metrics**: self-citation rate, self-citation h-index, h-index without self-citations
//! - **Polite by default**: 429 backoff, sequential author lookups, paced citation batches
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use self_citation_scholar::{
//!     AuthorQuery, NoopObserver, PipelineConfig, SelfCitationAnalyzer,
//!     client::SemanticScholarClient, config::Config,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SemanticScholarClient::new(Config::from_env()?)?;
//!     let analyzer = SelfCitationAnalyzer::new(Arc::new(client), PipelineConfig::default());
//!
//!     let query = AuthorQuery::single("1741101")?;
//!     let report = analyzer.analyze(&query, &NoopObserver, &CancellationToken::new()).await?;
//!     println!("{:.2}%", report.metrics.method1.self_citation_rate);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod retrieval;

pub use client::{ScholarSource, SemanticScholarClient};
pub use config::{Config, PipelineConfig};
pub use error::{AnalysisError, ClientError};
pub use models::AuthorQuery;
pub use pipeline::{
    AnalysisReport, AnalysisStage, NoopObserver, ProgressObserver, SelfCitationAnalyzer,
};
