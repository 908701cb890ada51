//! Pure analysis: identity merging, self-citation classification and metrics.
//!
//! Nothing here touches the network; the pipeline feeds these functions the
//! records it retrieved.

pub mod classifier;
pub mod identity;
pub mod metrics;

pub use classifier::{
    SelfCitationVerdict, classify, is_author_overlap_self_citation, is_self_citation_for_any,
    is_target_author_self_citation,
};
pub use identity::merge_authors;
pub use metrics::{AggregateMetrics, CoverageStats, MethodMetrics, h_index};
