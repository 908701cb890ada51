//! Run stages and their allowed transitions.

use serde::{Deserialize, Serialize};

use super::ProgressObserver;

/// Stage of one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisStage {
    /// Not started.
    #[default]
    Idle,
    /// Looking up author records.
    FetchingAuthors,
    /// Listing publications.
    FetchingPublications,
    /// Fetching and classifying citing works.
    AnalyzingCitations,
    /// Computing metrics.
    Aggregating,
    /// Report produced.
    Done,
    /// Run aborted.
    Failed,
}

impl AnalysisStage {
    /// True for `Done` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether a run may move from `self` to `next`.
    ///
    /// Stages advance strictly in order; any non-terminal stage may fail.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::FetchingAuthors)
                | (Self::FetchingAuthors, Self::FetchingPublications)
                | (Self::FetchingPublications, Self::AnalyzingCitations)
                | (Self::AnalyzingCitations, Self::Aggregating)
                | (Self::Aggregating, Self::Done)
        ) || (!self.is_terminal() && matches!(next, Self::Failed))
    }

    /// Human-readable stage name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingAuthors => "fetching authors",
            Self::FetchingPublications => "fetching publications",
            Self::AnalyzingCitations => "analyzing citations",
            Self::Aggregating => "aggregating",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Current stage of a run plus the observer told about every change.
pub(crate) struct StageTracker<'a> {
    stage: AnalysisStage,
    observer: &'a dyn ProgressObserver,
}

impl<'a> StageTracker<'a> {
    pub(crate) fn new(observer: &'a dyn ProgressObserver) -> Self {
        Self { stage: AnalysisStage::Idle, observer }
    }

    pub(crate) const fn stage(&self) -> AnalysisStage {
        self.stage
    }

    /// Move to `next` if allowed; rejected transitions are logged and ignored.
    pub(crate) fn advance(&mut self, next: AnalysisStage) {
        if !self.stage.can_transition_to(next) {
            tracing::error!(from = %self.stage, to = %next, "Rejected stage transition");
            return;
        }
        tracing::info!(from = %self.stage, to = %next, "Stage transition");
        self.stage = next;
        self.observer.on_stage(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NoopObserver;

    #[test]
    fn test_forward_chain() {
        let chain = [
            AnalysisStage::Idle,
            AnalysisStage::FetchingAuthors,
            AnalysisStage::FetchingPublications,
            AnalysisStage::AnalyzingCitations,
            AnalysisStage::Aggregating,
            AnalysisStage::Done,
        ];
        for pair in chain.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
            assert!(!pair[1].can_transition_to(pair[0]));
        }
    }

    #[test]
    fn test_failure_only_from_non_terminal() {
        assert!(AnalysisStage::Idle.can_transition_to(AnalysisStage::Failed));
        assert!(AnalysisStage::AnalyzingCitations.can_transition_to(AnalysisStage::Failed));
        assert!(!AnalysisStage::Done.can_transition_to(AnalysisStage::Failed));
        assert!(!AnalysisStage::Failed.can_transition_to(AnalysisStage::Failed));
    }

    #[test]
    fn test_no_skipping() {
        assert!(!AnalysisStage::Idle.can_transition_to(AnalysisStage::AnalyzingCitations));
        assert!(!AnalysisStage::FetchingAuthors.can_transition_to(AnalysisStage::Done));
    }

    #[test]
    fn test_tracker_ignores_invalid_transition() {
        let observer = NoopObserver;
        let mut tracker = StageTracker::new(&observer);
        tracker.advance(AnalysisStage::Done);
        assert_eq!(tracker.stage(), AnalysisStage::Idle);
        tracker.advance(AnalysisStage::FetchingAuthors);
        assert_eq!(tracker.stage(), AnalysisStage::FetchingAuthors);
    }
}
