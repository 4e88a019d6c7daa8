use std::sync::Once;

use codepad_core::{
    update, AppState, CapturedEvent, ConsoleLevel, Msg, RunPhase, SourceBundle,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pad_logging::initialize_for_tests);
}

fn running_state() -> AppState {
    let state = AppState::with_sources(SourceBundle::starter());
    let (state, _) = update(state, Msg::RunRequested);
    state
}

fn console(text: &str) -> CapturedEvent {
    CapturedEvent::Console {
        level: ConsoleLevel::Log,
        text: text.to_string(),
    }
}

fn error(message: &str) -> CapturedEvent {
    CapturedEvent::Error {
        message: message.to_string(),
        source: None,
        line: None,
        column: None,
        stack: None,
    }
}

#[test]
fn console_calls_append_in_order() {
    init_logging();
    let mut state = running_state();

    for text in ["one", "two", "three"] {
        let (next, effects) = update(
            state,
            Msg::SandboxEvent {
                run_id: 1,
                event: console(text),
            },
        );
        state = next;
        assert!(effects.is_empty());
    }

    let view = state.view();
    assert_eq!(
        view.console_output,
        vec!["[LOG] one", "[LOG] two", "[LOG] three"]
    );
    assert_eq!(view.error, None);
}

#[test]
fn error_event_raises_the_banner_and_joins_the_transcript() {
    init_logging();
    let state = running_state();

    let (state, _) = update(
        state,
        Msg::SandboxEvent {
            run_id: 1,
            event: error("boom"),
        },
    );

    let view = state.view();
    assert_eq!(view.error.as_deref(), Some("boom"));
    assert_eq!(view.console_output, vec!["[ERROR] boom"]);
    // Capturing an error never disturbs the run lifecycle.
    assert_eq!(state.phase(), RunPhase::Running);
}

#[test]
fn banner_tracks_the_most_recent_error() {
    init_logging();
    let state = running_state();
    let (state, _) = update(
        state,
        Msg::SandboxEvent {
            run_id: 1,
            event: error("first"),
        },
    );
    let (state, _) = update(
        state,
        Msg::SandboxEvent {
            run_id: 1,
            event: error("second"),
        },
    );

    assert_eq!(state.view().error.as_deref(), Some("second"));
    assert_eq!(state.view().console_output.len(), 2);
}

#[test]
fn stale_run_events_are_discarded() {
    init_logging();
    let state = running_state();
    // A second run supersedes the first; its events must not show up.
    let (state, _) = update(state, Msg::RunRequested);
    assert_eq!(state.run_id(), 2);

    let (state, _) = update(
        state,
        Msg::SandboxEvent {
            run_id: 1,
            event: console("left over"),
        },
    );

    assert!(state.view().console_output.is_empty());
}

#[test]
fn a_new_run_clears_history_and_banner_first() {
    init_logging();
    let state = running_state();
    let (state, _) = update(
        state,
        Msg::SandboxEvent {
            run_id: 1,
            event: error("boom"),
        },
    );
    assert!(state.view().error.is_some());

    // The new run may produce zero events; the display must still be empty.
    let (state, _) = update(state, Msg::RunRequested);

    let view = state.view();
    assert!(view.console_output.is_empty());
    assert_eq!(view.error, None);
}

#[test]
fn events_are_accepted_after_settle_until_superseded() {
    init_logging();
    let state = running_state();
    let (state, _) = update(state, Msg::SettleElapsed { run_id: 1 });
    assert_eq!(state.phase(), RunPhase::Idle);

    // Deferred callbacks keep reporting after the settle window.
    let (state, _) = update(
        state,
        Msg::SandboxEvent {
            run_id: 1,
            event: console("late"),
        },
    );

    assert_eq!(state.view().console_output, vec!["[LOG] late"]);
}
