//! Retrieval of publications and citing works from a [`ScholarSource`].
//!
//! [`ScholarSource`]: crate::client::ScholarSource

mod citations;
mod publications;

pub use citations::{CitationRetriever, CitingWorksOutcome};
pub use publications::PublicationRetriever;
