//! Enumeration types for analysis parameters and results.

use serde::{Deserialize, Serialize};

use super::Publication;

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

impl ResponseFormat {
    /// Check if this is markdown format.
    #[must_use]
    pub const fn is_markdown(self) -> bool {
        matches!(self, Self::Markdown)
    }

    /// Check if this is JSON format.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// The two self-citation detection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelfCitationMethod {
    /// Method 1: the analyzed author appears on the citing work.
    TargetAuthor,
    /// Method 2: any author of the cited paper appears on the citing work.
    AuthorOverlap,
}

impl SelfCitationMethod {
    /// Both methods, in report order.
    pub const ALL: [Self; 2] = [Self::TargetAuthor, Self::AuthorOverlap];

    /// Short label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TargetAuthor => "Method 1 (target author)",
            Self::AuthorOverlap => "Method 2 (author overlap)",
        }
    }
}

/// Coarse band for a self-citation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfCitationIntensity {
    /// Rate of 5% or less.
    Low,
    /// Rate above 5% and up to 10%.
    Moderate,
    /// Rate above 10%.
    High,
}

impl SelfCitationIntensity {
    /// Band for a rate given in percent.
    #[must_use]
    pub fn from_rate(rate_percent: f64) -> Self {
        if rate_percent > 10.0 {
            Self::High
        } else if rate_percent > 5.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Low self-citation rate",
            Self::Moderate => "Moderate self-citation rate",
            Self::High => "High self-citation rate",
        }
    }
}

impl std::fmt::Display for SelfCitationIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        })
    }
}

/// Ordering of publications in rendered reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationOrder {
    /// Most method-1 self-citations first.
    #[default]
    SelfCitations,
    /// Most raw citations first.
    Citations,
    /// Newest first; papers without a year last.
    Year,
}

impl PublicationOrder {
    /// Sort publications in place. The sort is stable, so ties keep API order.
    pub fn sort(self, papers: &mut [Publication]) {
        match self {
            Self::SelfCitations => papers.sort_by(|a, b| {
                b.self_citations(SelfCitationMethod::TargetAuthor)
                    .cmp(&a.self_citations(SelfCitationMethod::TargetAuthor))
            }),
            Self::Citations => papers.sort_by(|a, b| b.citation_count.cmp(&a.citation_count)),
            Self::Year => papers.sort_by(|a, b| b.year.cmp(&a.year)),
        }
    }
}
