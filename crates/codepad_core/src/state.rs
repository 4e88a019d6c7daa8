use crate::view_model::AppViewModel;

pub type RunId = u64;

/// Snapshot of the three editor buffers. Replaced wholesale on every edit,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceBundle {
    pub html: String,
    pub css: String,
    pub javascript: String,
}

impl SourceBundle {
    pub fn new(
        html: impl Into<String>,
        css: impl Into<String>,
        javascript: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            javascript: javascript.into(),
        }
    }

    /// The welcome buffers a fresh playground opens with.
    pub fn starter() -> Self {
        Self::new(STARTER_HTML, STARTER_CSS, STARTER_JS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
}

/// One console call or one runtime error observed inside the sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedEvent {
    Console {
        level: ConsoleLevel,
        text: String,
    },
    Error {
        message: String,
        source: Option<String>,
        line: Option<u32>,
        column: Option<u32>,
        stack: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    /// Debounce timer pending; the next matching `DebounceElapsed` starts a run.
    Scheduled,
    /// Sandbox reload issued, settle timer pending.
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    sources: SourceBundle,
    phase: RunPhase,
    run_id: RunId,
    debounce_generation: u64,
    events: Vec<CapturedEvent>,
    error_banner: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(sources: SourceBundle) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    pub fn sources(&self) -> &SourceBundle {
        &self.sources
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Identifier of the current run; 0 until the first run starts.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            is_running: self.phase == RunPhase::Running,
            console_output: self
                .events
                .iter()
                .map(crate::view_model::transcript_line)
                .collect(),
            error: self.error_banner.clone(),
        }
    }

    /// Returns the dirty flag and clears it; the shell uses this to coalesce
    /// rendering.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_sources(&mut self, sources: SourceBundle) {
        self.sources = sources;
    }

    /// Moves to `Scheduled` and invalidates any pending debounce timer.
    /// Returns the generation the new timer must report back.
    pub(crate) fn schedule(&mut self) -> u64 {
        self.phase = RunPhase::Scheduled;
        self.debounce_generation += 1;
        self.dirty = true;
        self.debounce_generation
    }

    pub(crate) fn debounce_generation(&self) -> u64 {
        self.debounce_generation
    }

    /// Starts a new run: fresh run id, cleared output, `Running`.
    /// Any timer still pending for the debounce phase is invalidated.
    pub(crate) fn begin_run(&mut self) -> RunId {
        self.debounce_generation += 1;
        self.run_id += 1;
        self.events.clear();
        self.error_banner = None;
        self.phase = RunPhase::Running;
        self.dirty = true;
        self.run_id
    }

    pub(crate) fn complete_run(&mut self) {
        self.phase = RunPhase::Idle;
        self.dirty = true;
    }

    pub(crate) fn push_event(&mut self, event: CapturedEvent) {
        if let CapturedEvent::Error { message, .. } = &event {
            self.error_banner = Some(message.clone());
        }
        self.events.push(event);
        self.dirty = true;
    }
}

const STARTER_HTML: &str = r#"<div class="container">
    <h1>Welcome to Codepad</h1>
    <p>Edit the buffers and watch the preview follow along.</p>
    <button onclick="sayHello()">Click me!</button>
</div>
"#;

const STARTER_CSS: &str = r#".container {
    max-width: 480px;
    margin: 4rem auto;
    padding: 2rem;
    border-radius: 12px;
    box-shadow: 0 10px 25px rgba(0, 0, 0, 0.1);
    text-align: center;
    font-family: sans-serif;
}

button {
    background: #667eea;
    color: white;
    border: none;
    padding: 12px 24px;
    border-radius: 6px;
    cursor: pointer;
}
"#;

const STARTER_JS: &str = r#"function sayHello() {
    console.log('Button clicked!');
}

console.log('Codepad is ready');
"#;
