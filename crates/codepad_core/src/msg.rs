use crate::{CapturedEvent, RunId, SourceBundle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// One of the editor buffers changed; carries the full current bundle.
    SourcesEdited(SourceBundle),
    /// A stored snippet was loaded into the editors.
    SnippetLoaded(SourceBundle),
    /// Explicit run action, skipping the debounce wait.
    RunRequested,
    /// The debounce timer started for `generation` fired.
    DebounceElapsed { generation: u64 },
    /// The post-reload settle timer for `run_id` fired.
    SettleElapsed { run_id: RunId },
    /// An instrumented event arrived from the sandbox over the relay.
    SandboxEvent { run_id: RunId, event: CapturedEvent },
    /// Fallback for placeholder wiring.
    NoOp,
}
