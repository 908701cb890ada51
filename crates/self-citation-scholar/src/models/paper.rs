//! Publication and citing-work models matching the Semantic Scholar API schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AuthorRef, SelfCitationMethod, author_refs, lenient_authors, null_as_default};

/// A publication of the analyzed author.
///
/// Fetched without citation data; the pipeline attaches the citing works,
/// the lookup outcome and both self-citation counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Unique Semantic Scholar paper ID.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// List of authors (entries that are not author objects are dropped).
    #[serde(default, deserialize_with = "lenient_authors")]
    pub authors: Vec<AuthorRef>,

    /// Publication venue (journal or conference).
    #[serde(default)]
    pub venue: Option<String>,

    /// Number of citations this paper has received.
    #[serde(default, deserialize_with = "null_as_default")]
    pub citation_count: u32,

    /// Number of references in this paper.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference_count: u32,

    /// Fields of study (e.g., "Computer Science", "Medicine").
    #[serde(default)]
    pub fields_of_study: Option<Vec<String>>,

    /// Semantic Scholar page URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Validated citing works.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citing_works: Option<Vec<CitingWork>>,

    /// Citing works where a constituent author id appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method1_self_citation_count: Option<u32>,

    /// Citing works sharing any author with this paper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method2_self_citation_count: Option<u32>,

    /// How the citing-works lookup went.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_lookup: Option<CitationLookup>,
}

impl Publication {
    /// Get the paper title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Self-citation count under `method`, 0 before enrichment.
    #[must_use]
    pub fn self_citations(&self, method: SelfCitationMethod) -> u32 {
        match method {
            SelfCitationMethod::TargetAuthor => self.method1_self_citation_count,
            SelfCitationMethod::AuthorOverlap => self.method2_self_citation_count,
        }
        .unwrap_or(0)
    }

    /// Raw citations minus self-citations under `method`, floored at zero.
    #[must_use]
    pub fn citations_without_self(&self, method: SelfCitationMethod) -> u32 {
        self.citation_count.saturating_sub(self.self_citations(method))
    }

    /// Self-citations under `method` as a percentage of raw citations, 0 with none.
    #[must_use]
    pub fn self_citation_rate(&self, method: SelfCitationMethod) -> f64 {
        if self.citation_count == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.self_citations(method)) / f64::from(self.citation_count)
    }

    /// Number of citing works actually retrieved.
    #[must_use]
    pub fn citing_works_fetched(&self) -> usize {
        self.citing_works.as_ref().map_or(0, Vec::len)
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_ref())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A work citing one of the analyzed publications.
///
/// Only built through [`CitingWork::try_from_value`], so every instance has
/// a paper id and an author list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitingWork {
    /// Paper ID.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Authors (entries that were not objects are dropped).
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// Publication venue.
    #[serde(default)]
    pub venue: Option<String>,

    /// Semantic Scholar page URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// Why a citing-paper entry was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MalformedReason {
    /// The entry had no `citingPaper` object.
    MissingCitingPaper,
    /// `citingPaper` was not a JSON object.
    NotAnObject,
    /// `paperId` absent, null or blank.
    MissingPaperId,
    /// `authors` absent or null.
    MissingAuthors,
    /// `authors` present but not an array.
    AuthorsNotAList,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::MissingCitingPaper => "missing citingPaper",
            Self::NotAnObject => "citingPaper is not an object",
            Self::MissingPaperId => "missing paperId",
            Self::MissingAuthors => "missing authors",
            Self::AuthorsNotAList => "authors is not a list",
        };
        f.write_str(reason)
    }
}

impl CitingWork {
    /// Validate one raw `citingPaper` value.
    pub fn try_from_value(value: Value) -> Result<Self, MalformedReason> {
        let Value::Object(mut obj) = value else {
            return Err(if value.is_null() {
                MalformedReason::MissingCitingPaper
            } else {
                MalformedReason::NotAnObject
            });
        };

        let paper_id = match obj.remove("paperId") {
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            _ => return Err(MalformedReason::MissingPaperId),
        };

        let authors = match obj.remove("authors") {
            Some(Value::Array(items)) => author_refs(items),
            None | Some(Value::Null) => return Err(MalformedReason::MissingAuthors),
            Some(_) => return Err(MalformedReason::AuthorsNotAList),
        };

        Ok(Self {
            paper_id,
            title: take_string(&mut obj, "title"),
            year: obj.get("year").and_then(Value::as_i64).and_then(|y| i32::try_from(y).ok()),
            authors,
            venue: take_string(&mut obj, "venue"),
            url: take_string(&mut obj, "url"),
        })
    }
}

fn take_string(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    match obj.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Outcome of the citing-works lookup for one publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CitationLookup {
    /// Citations were retrieved.
    Complete,
    /// The citation graph does not know this paper (404).
    NotFound,
    /// The lookup failed; counts for this paper are understated.
    #[serde(rename_all = "camelCase")]
    Failed {
        /// HTTP status of the failure, if there was a response.
        http_status: Option<u16>,
    },
}

impl CitationLookup {
    /// True if the lookup did not complete.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        !matches!(self, Self::Complete)
    }
}

/// One page of `GET /author/{id}/papers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorPapersPage {
    /// Offset of this page.
    #[serde(default)]
    pub offset: u32,

    /// Next offset if the API reports more results.
    #[serde(default)]
    pub next: Option<u32>,

    /// Publications in this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Publication>,
}

/// Raw entry of `GET /paper/{id}/citations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationEdge {
    /// The citing paper, unvalidated.
    #[serde(default)]
    pub citing_paper: Value,
}

/// Response of `GET /paper/{id}/citations`.
///
/// Entries stay as raw JSON so a single malformed record cannot fail the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationPage {
    /// Offset for pagination.
    #[serde(default)]
    pub offset: u32,

    /// Next offset if more results are available.
    #[serde(default)]
    pub next: Option<u32>,

    /// Raw citation entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Value>,
}

impl CitationPage {
    /// Validate every entry, in order.
    pub fn into_citing_works(self) -> impl Iterator<Item = Result<CitingWork, MalformedReason>> {
        self.data.into_iter().map(|entry| {
            let edge: CitationEdge = serde_json::from_value(entry)
                .map_err(|_| MalformedReason::MissingCitingPaper)?;
            CitingWork::try_from_value(edge.citing_paper)
        })
    }
}
