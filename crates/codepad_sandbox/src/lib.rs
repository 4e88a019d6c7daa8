//! Codepad sandbox: document assembly, instrumentation and the host relay.
mod document;
mod host;
mod instrument;
mod message;
mod persist;
mod relay;
mod types;

pub use document::assemble;
pub use host::{DiskSurface, PreviewSurface, SurfaceError};
pub use instrument::instrumentation;
pub use message::decode;
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use relay::SandboxHandle;
pub use types::{ConsoleMethod, RunId, RuntimeError, SandboxEvent, SandboxPayload};
