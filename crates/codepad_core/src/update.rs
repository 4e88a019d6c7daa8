use crate::{AppState, Effect, Msg, RunPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourcesEdited(sources) | Msg::SnippetLoaded(sources) => {
            // Every edit restarts the debounce window, whatever the phase.
            state.set_sources(sources);
            let generation = state.schedule();
            vec![Effect::StartDebounce { generation }]
        }
        Msg::DebounceElapsed { generation } => {
            if state.phase() != RunPhase::Scheduled
                || generation != state.debounce_generation()
            {
                // A later edit or a manual run superseded this timer.
                return (state, Vec::new());
            }
            begin_run(&mut state)
        }
        Msg::RunRequested => begin_run(&mut state),
        Msg::SettleElapsed { run_id } => {
            // Completion is best-effort: the settle timer fires whether or not
            // the sandboxed script is actually done. Ignore timers for
            // superseded runs and timers that land after a new edit already
            // moved the phase on.
            if run_id == state.run_id() && state.phase() == RunPhase::Running {
                state.complete_run();
            }
            Vec::new()
        }
        Msg::SandboxEvent { run_id, event } => {
            // Stale-run events are discarded; there is no way to halt an
            // in-flight script, so cancellation is emulated by filtering.
            if run_id == state.run_id() {
                state.push_event(event);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Clears the previous run's output and issues the reload effects.
fn begin_run(state: &mut AppState) -> Vec<Effect> {
    let run_id = state.begin_run();
    vec![
        Effect::LoadPreview {
            run_id,
            sources: state.sources().clone(),
        },
        Effect::StartSettle { run_id },
    ]
}
