use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use codepad_core::{CapturedEvent, ConsoleLevel, Effect, Msg};
use codepad_sandbox::{
    assemble, ConsoleMethod, DiskSurface, SandboxEvent, SandboxHandle, SandboxPayload,
};
use pad_logging::pad_info;

use crate::app::ShellCommand;

/// Quiet period after the latest edit before a run starts.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);
/// Best-effort window for a reloaded document to settle before the run is
/// declared complete. There is no actual completion signal from an
/// arbitrarily-scripted document.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

const PUMP_INTERVAL: Duration = Duration::from_millis(20);

/// Executes controller effects: timers post messages back, preview loads go
/// to the sandbox handle, and a pump thread forwards decoded sandbox events.
pub struct EffectRunner {
    sandbox: SandboxHandle,
    tx: Sender<ShellCommand>,
}

impl EffectRunner {
    pub fn new(tx: Sender<ShellCommand>, preview_dir: PathBuf) -> Self {
        let surface = DiskSurface::new(preview_dir);
        let sandbox = SandboxHandle::new(Box::new(surface));
        let runner = Self { sandbox, tx };
        runner.spawn_event_pump();
        runner
    }

    /// Relay endpoint for the embedding surface; raw payloads pushed here
    /// come back out as `Msg::SandboxEvent`.
    pub fn sandbox(&self) -> SandboxHandle {
        self.sandbox.clone()
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartDebounce { generation } => {
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        thread::sleep(DEBOUNCE_DELAY);
                        let _ = tx.send(ShellCommand::Core(Msg::DebounceElapsed { generation }));
                    });
                }
                Effect::LoadPreview { run_id, sources } => {
                    pad_info!(
                        "LoadPreview run={} html_len={} css_len={} js_len={}",
                        run_id,
                        sources.html.len(),
                        sources.css.len(),
                        sources.javascript.len()
                    );
                    let document =
                        assemble(&sources.html, &sources.css, &sources.javascript, run_id);
                    self.sandbox.load(run_id, document);
                }
                Effect::StartSettle { run_id } => {
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        thread::sleep(SETTLE_DELAY);
                        let _ = tx.send(ShellCommand::Core(Msg::SettleElapsed { run_id }));
                    });
                }
            }
        }
    }

    fn spawn_event_pump(&self) {
        let sandbox = self.sandbox.clone();
        let tx = self.tx.clone();
        thread::spawn(move || loop {
            if let Some(event) = sandbox.try_recv() {
                if tx.send(ShellCommand::Core(map_event(event))).is_err() {
                    break;
                }
            } else {
                thread::sleep(PUMP_INTERVAL);
            }
        });
    }
}

fn map_event(event: SandboxEvent) -> Msg {
    let SandboxEvent { run_id, payload } = event;
    let event = match payload {
        SandboxPayload::Console { method, args } => CapturedEvent::Console {
            level: map_level(method),
            text: args.join(" "),
        },
        SandboxPayload::Error(err) => CapturedEvent::Error {
            message: err.message,
            source: err.source,
            line: err.line,
            column: err.column,
            stack: err.stack,
        },
    };
    Msg::SandboxEvent { run_id, event }
}

fn map_level(method: ConsoleMethod) -> ConsoleLevel {
    match method {
        ConsoleMethod::Log => ConsoleLevel::Log,
        ConsoleMethod::Warn => ConsoleLevel::Warn,
        ConsoleMethod::Error => ConsoleLevel::Error,
    }
}
