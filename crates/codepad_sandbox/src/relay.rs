use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use pad_logging::{pad_debug, pad_error};

use crate::host::PreviewSurface;
use crate::{message, RunId, SandboxEvent};

enum SandboxCommand {
    Load { run_id: RunId, document: String },
    Inbound { raw: String },
}

/// Owns the preview surface on a dedicated thread and relays decoded sandbox
/// events back to the controller.
///
/// Commands and events each travel over a single unbounded FIFO channel, so
/// delivery order always matches emission order. Malformed or unrecognized
/// inbound payloads are dropped before they reach the event channel.
#[derive(Clone)]
pub struct SandboxHandle {
    cmd_tx: mpsc::Sender<SandboxCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<SandboxEvent>>>,
}

impl SandboxHandle {
    pub fn new(mut surface: Box<dyn PreviewSurface>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<SandboxEvent>();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    SandboxCommand::Load { run_id, document } => {
                        if let Err(err) = surface.load(&document) {
                            pad_error!("Failed to load preview for run {}: {}", run_id, err);
                        }
                    }
                    SandboxCommand::Inbound { raw } => match message::decode(&raw) {
                        Some(event) => {
                            let _ = event_tx.send(event);
                        }
                        None => {
                            pad_debug!("Dropping unrecognized relay payload ({} bytes)", raw.len());
                        }
                    },
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Replace the surface content with `document` for `run_id`.
    pub fn load(&self, run_id: RunId, document: impl Into<String>) {
        let _ = self.cmd_tx.send(SandboxCommand::Load {
            run_id,
            document: document.into(),
        });
    }

    /// Feed one raw payload from the embedding surface into the relay.
    pub fn push_raw(&self, raw: impl Into<String>) {
        let _ = self.cmd_tx.send(SandboxCommand::Inbound { raw: raw.into() });
    }

    /// Next decoded event, if one is waiting.
    pub fn try_recv(&self) -> Option<SandboxEvent> {
        let rx = self.event_rx.lock().ok()?;
        rx.try_recv().ok()
    }
}
