use serde::Deserialize;

use crate::{ConsoleMethod, RunId, RuntimeError, SandboxEvent, SandboxPayload};

/// Raw shape of one relay payload as posted by the instrumentation script.
/// The `run` tag is mandatory; untagged payloads are not trusted.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WirePayload {
    Console {
        run: RunId,
        method: String,
        args: Vec<String>,
    },
    Error {
        run: RunId,
        message: String,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        line: Option<u32>,
        #[serde(default)]
        column: Option<u32>,
        #[serde(default)]
        stack: Option<String>,
    },
}

/// Decodes one raw relay payload. Returns `None` for anything malformed or
/// unrecognized; the relay drops such payloads instead of propagating them.
pub fn decode(raw: &str) -> Option<SandboxEvent> {
    let wire: WirePayload = serde_json::from_str(raw).ok()?;
    match wire {
        WirePayload::Console { run, method, args } => {
            let method = ConsoleMethod::from_wire(&method)?;
            Some(SandboxEvent {
                run_id: run,
                payload: SandboxPayload::Console { method, args },
            })
        }
        WirePayload::Error {
            run,
            message,
            source,
            line,
            column,
            stack,
        } => Some(SandboxEvent {
            run_id: run,
            payload: SandboxPayload::Error(RuntimeError {
                message,
                source,
                line,
                column,
                stack,
            }),
        }),
    }
}
