//! Codepad core: pure preview-controller state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, CapturedEvent, ConsoleLevel, RunId, RunPhase, SourceBundle};
pub use update::update;
pub use view_model::{transcript_line, AppViewModel};
