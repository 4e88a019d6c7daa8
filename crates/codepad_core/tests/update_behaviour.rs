use std::sync::Once;

use codepad_core::{update, AppState, Effect, Msg, RunPhase, SourceBundle};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pad_logging::initialize_for_tests);
}

fn bundle(tag: &str) -> SourceBundle {
    SourceBundle::new(
        format!("<p>{tag}</p>"),
        format!("p {{ content: '{tag}'; }}"),
        format!("console.log('{tag}');"),
    )
}

fn edit(state: AppState, tag: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::SourcesEdited(bundle(tag)))
}

#[test]
fn edit_schedules_a_debounced_run() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = edit(state, "a");

    assert_eq!(state.phase(), RunPhase::Scheduled);
    assert_eq!(effects, vec![Effect::StartDebounce { generation: 1 }]);
    assert!(!state.view().is_running);
}

#[test]
fn edit_burst_coalesces_into_one_run_with_the_last_bundle() {
    init_logging();
    let mut state = AppState::new();

    // Five edits inside the debounce window, each restarting the timer.
    for (i, tag) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        let (next, effects) = edit(state, tag);
        state = next;
        assert_eq!(
            effects,
            vec![Effect::StartDebounce {
                generation: (i + 1) as u64
            }]
        );
    }

    // Timers for superseded generations fire first and must do nothing.
    for stale in 1..=4 {
        let (next, effects) = update(state, Msg::DebounceElapsed { generation: stale });
        state = next;
        assert!(effects.is_empty());
        assert_eq!(state.phase(), RunPhase::Scheduled);
    }

    let (state, effects) = update(state, Msg::DebounceElapsed { generation: 5 });
    assert_eq!(state.phase(), RunPhase::Running);
    assert_eq!(
        effects,
        vec![
            Effect::LoadPreview {
                run_id: 1,
                sources: bundle("e"),
            },
            Effect::StartSettle { run_id: 1 },
        ]
    );
}

#[test]
fn manual_run_skips_the_debounce_wait() {
    init_logging();
    let state = AppState::new();
    let (state, _) = edit(state, "a");
    assert_eq!(state.phase(), RunPhase::Scheduled);

    let (state, effects) = update(state, Msg::RunRequested);

    assert_eq!(state.phase(), RunPhase::Running);
    assert_eq!(
        effects,
        vec![
            Effect::LoadPreview {
                run_id: 1,
                sources: bundle("a"),
            },
            Effect::StartSettle { run_id: 1 },
        ]
    );

    // The still-pending debounce timer must not trigger a second run.
    let (state, effects) = update(state, Msg::DebounceElapsed { generation: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.phase(), RunPhase::Running);
}

#[test]
fn settle_completes_the_current_run() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::RunRequested);
    assert!(state.view().is_running);

    let (state, effects) = update(state, Msg::SettleElapsed { run_id: 1 });

    assert!(effects.is_empty());
    assert_eq!(state.phase(), RunPhase::Idle);
    assert!(!state.view().is_running);
}

#[test]
fn stale_settle_timers_are_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::RunRequested);
    let (state, _) = update(state, Msg::RunRequested);
    assert_eq!(state.run_id(), 2);

    // The first run's settle timer lands while run 2 is active.
    let (state, _) = update(state, Msg::SettleElapsed { run_id: 1 });
    assert_eq!(state.phase(), RunPhase::Running);

    let (state, _) = update(state, Msg::SettleElapsed { run_id: 2 });
    assert_eq!(state.phase(), RunPhase::Idle);
}

#[test]
fn settle_does_not_cancel_a_newly_scheduled_run() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::RunRequested);
    // An edit during the run moves the controller back to Scheduled.
    let (state, _) = edit(state, "b");
    assert_eq!(state.phase(), RunPhase::Scheduled);

    let (state, _) = update(state, Msg::SettleElapsed { run_id: 1 });

    assert_eq!(state.phase(), RunPhase::Scheduled);
}

#[test]
fn snippet_load_behaves_like_an_edit() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(state, Msg::SnippetLoaded(bundle("snippet")));

    assert_eq!(state.phase(), RunPhase::Scheduled);
    assert_eq!(effects, vec![Effect::StartDebounce { generation: 1 }]);
    assert_eq!(state.sources(), &bundle("snippet"));
}

#[test]
fn dirty_flag_coalesces_rendering() {
    init_logging();
    let mut state = AppState::new();
    assert!(!state.consume_dirty());

    let (mut state, _) = edit(state, "a");
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());

    // Ignored messages leave the state clean.
    let (mut state, _) = update(state, Msg::DebounceElapsed { generation: 99 });
    assert!(!state.consume_dirty());
}
