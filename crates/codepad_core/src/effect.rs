use crate::{RunId, SourceBundle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the debounce timer. Only a `DebounceElapsed` carrying the
    /// same generation may start the run; earlier timers are stale.
    StartDebounce { generation: u64 },
    /// Assemble a document from `sources` and load it into the sandbox.
    LoadPreview { run_id: RunId, sources: SourceBundle },
    /// Start the settle timer that marks `run_id` complete.
    StartSettle { run_id: RunId },
}
