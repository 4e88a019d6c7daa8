use crate::{CapturedEvent, ConsoleLevel};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub is_running: bool,
    /// Chronological transcript of the current run, one formatted line per
    /// captured event.
    pub console_output: Vec<String>,
    /// Most recent runtime error of the current run, if any.
    pub error: Option<String>,
}

/// Formats one captured event the way the transcript panel shows it.
pub fn transcript_line(event: &CapturedEvent) -> String {
    match event {
        CapturedEvent::Console { level, text } => {
            let tag = match level {
                ConsoleLevel::Log => "LOG",
                ConsoleLevel::Warn => "WARN",
                ConsoleLevel::Error => "ERROR",
            };
            format!("[{tag}] {text}")
        }
        CapturedEvent::Error { message, .. } => format!("[ERROR] {message}"),
    }
}
