pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Log,
    Warn,
    Error,
}

impl ConsoleMethod {
    pub(crate) fn from_wire(name: &str) -> Option<Self> {
        match name {
            "log" => Some(ConsoleMethod::Log),
            "warn" => Some(ConsoleMethod::Warn),
            "error" => Some(ConsoleMethod::Error),
            _ => None,
        }
    }
}

/// A runtime error reported from inside the sandboxed document, either by
/// the global handler or by the guard around the user script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub message: String,
    pub source: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub stack: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxPayload {
    Console {
        method: ConsoleMethod,
        args: Vec<String>,
    },
    Error(RuntimeError),
}

/// One decoded relay message, tagged with the run that emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxEvent {
    pub run_id: RunId,
    pub payload: SandboxPayload,
}
