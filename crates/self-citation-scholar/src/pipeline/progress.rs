//! Progress reporting hooks.

use super::AnalysisStage;

/// Receives progress of an analysis run.
///
/// Called synchronously from the run; implementations must not block.
pub trait ProgressObserver: Send + Sync {
    /// A publication finished: `completed` of `total` are done.
    fn on_progress(&self, completed: usize, total: usize);

    /// The run entered `stage`.
    fn on_stage(&self, _stage: AnalysisStage) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _completed: usize, _total: usize) {}
}
