use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;

use codepad_core::{update, AppState, AppViewModel, Msg};
use codepad_sandbox::SandboxHandle;
use pad_logging::{pad_info, pad_warn};

use crate::context::UiContext;
use crate::effects::EffectRunner;
use crate::snippets::{NewSnippet, SnippetStore};
use crate::watcher;

/// Owner id for locally saved snippets; real accounts are out of scope.
const LOCAL_USER: &str = "local";

/// Everything the main loop can be asked to do: controller messages plus the
/// snippet/theme plumbing that lives outside the core state machine.
pub enum ShellCommand {
    Core(Msg),
    SaveSnippet { title: String },
    LoadSnippet { id: String },
    ForkSnippet { id: String, title: String },
    DeleteSnippet { id: String },
    ListSnippets,
    ToggleTheme,
    Quit,
}

pub fn run_app() -> io::Result<()> {
    let workspace = std::env::current_dir()?;
    let mut context = UiContext::load(&workspace);
    let store = SnippetStore::new(workspace.join("snippets"));

    let (tx, rx) = mpsc::channel::<ShellCommand>();
    let runner = EffectRunner::new(tx.clone(), workspace.join("preview"));

    // Seed the buffers, then watch them for edits.
    let initial = watcher::ensure_buffers(&workspace)?;
    watcher::spawn(workspace.clone(), tx.clone());
    let _ = tx.send(ShellCommand::Core(Msg::SourcesEdited(initial)));

    spawn_command_loop(tx.clone(), runner.sandbox());
    pad_info!("codepad ready in {:?}", workspace);

    let mut state = AppState::new();
    let mut renderer = TranscriptRenderer::default();

    for command in rx.iter() {
        match command {
            ShellCommand::Core(msg) => {
                state = dispatch(state, msg, &runner, &mut renderer);
            }
            ShellCommand::SaveSnippet { title } => {
                let new = NewSnippet {
                    title,
                    description: None,
                    sources: state.sources().clone(),
                    is_public: false,
                    user_id: LOCAL_USER.to_string(),
                };
                match store.save(new) {
                    Ok(snippet) => println!("saved {} ({})", snippet.id, snippet.title),
                    Err(err) => pad_warn!("Failed to save snippet: {}", err),
                }
            }
            ShellCommand::LoadSnippet { id } => match store.load(&id) {
                Ok(snippet) => {
                    let sources = snippet.sources();
                    // Reflect the loaded snippet in the buffer files so an
                    // external editor sees what the preview runs.
                    if let Err(err) = watcher::write_buffers(&workspace, &sources) {
                        pad_warn!("Failed to write buffer files: {}", err);
                    }
                    state = dispatch(state, Msg::SnippetLoaded(sources), &runner, &mut renderer);
                }
                Err(err) => pad_warn!("Failed to load snippet {}: {}", id, err),
            },
            ShellCommand::ForkSnippet { id, title } => {
                match store.fork(&id, title, LOCAL_USER.to_string()) {
                    Ok(fork) => println!("forked {} -> {} ({})", id, fork.id, fork.title),
                    Err(err) => pad_warn!("Failed to fork snippet {}: {}", id, err),
                }
            }
            ShellCommand::DeleteSnippet { id } => match store.delete(&id) {
                Ok(()) => println!("deleted {id}"),
                Err(err) => pad_warn!("Failed to delete snippet {}: {}", id, err),
            },
            ShellCommand::ListSnippets => {
                for snippet in store.list() {
                    let visibility = if snippet.is_public { "public" } else { "private" };
                    println!("{}  {}  {}", snippet.id, visibility, snippet.title);
                }
            }
            ShellCommand::ToggleTheme => {
                context.toggle_theme();
                let label = if context.theme.is_dark { "dark" } else { "light" };
                println!("theme: {label}");
            }
            ShellCommand::Quit => break,
        }
    }

    context.flush(&workspace);
    Ok(())
}

fn dispatch(
    state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    renderer: &mut TranscriptRenderer,
) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        renderer.render(&state.view());
    }
    state
}

/// Reads user commands from stdin. Lines starting with `{` are raw relay
/// payloads piped in by the embedding surface and go straight to the sandbox
/// handle.
fn spawn_command_loop(tx: Sender<ShellCommand>, relay: SandboxHandle) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('{') {
                relay.push_raw(line);
                continue;
            }
            let Some(command) = parse_command(line) else {
                println!(
                    "commands: run | save <title> | load <id> | fork <id> <title> | \
                     delete <id> | list | theme | quit"
                );
                continue;
            };
            let quit = matches!(command, ShellCommand::Quit);
            if tx.send(command).is_err() || quit {
                return;
            }
        }
        let _ = tx.send(ShellCommand::Quit);
    });
}

fn parse_command(line: &str) -> Option<ShellCommand> {
    let (head, rest) = match line.split_once(' ') {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "run" => Some(ShellCommand::Core(Msg::RunRequested)),
        "save" if !rest.is_empty() => Some(ShellCommand::SaveSnippet {
            title: rest.to_string(),
        }),
        "load" if !rest.is_empty() => Some(ShellCommand::LoadSnippet {
            id: rest.to_string(),
        }),
        "fork" => {
            let (id, title) = rest.split_once(' ')?;
            Some(ShellCommand::ForkSnippet {
                id: id.to_string(),
                title: title.trim().to_string(),
            })
        }
        "delete" if !rest.is_empty() => Some(ShellCommand::DeleteSnippet {
            id: rest.to_string(),
        }),
        "list" => Some(ShellCommand::ListSnippets),
        "theme" => Some(ShellCommand::ToggleTheme),
        "quit" | "exit" => Some(ShellCommand::Quit),
        _ => None,
    }
}

/// Prints the transcript incrementally: new lines as they arrive, a banner
/// line when the error changes, and a separator when a fresh run begins.
#[derive(Default)]
struct TranscriptRenderer {
    printed: usize,
    last_error: Option<String>,
    was_running: bool,
}

impl TranscriptRenderer {
    fn render(&mut self, view: &AppViewModel) {
        if view.is_running && !self.was_running {
            println!("--- running ---");
            self.printed = 0;
            self.last_error = None;
        }
        self.was_running = view.is_running;

        if view.console_output.len() < self.printed {
            self.printed = 0;
        }
        for line in &view.console_output[self.printed..] {
            println!("{line}");
        }
        self.printed = view.console_output.len();

        if view.error != self.last_error {
            if let Some(error) = &view.error {
                println!("!! {error}");
            }
            self.last_error = view.error.clone();
        }
    }
}
