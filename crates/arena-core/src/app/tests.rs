use super::*;
use crate::{
    batch::Solution,
    input::{InputEvent, InputProvider, RawText, mock::MockInput},
    source::{BatchSource, fixture::FixtureBatchSource},
};

struct ScriptedInput<'a> {
    events: &'a [InputEvent],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    const fn new(events: &'a [InputEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).cloned() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}

fn id(raw: u32) -> BatchId {
    BatchId::new(raw).unwrap()
}

fn batch_with_agents(raw: u32, agents: &[&str]) -> Batch {
    let mut batch = Batch::new(id(raw));
    for agent in agents {
        batch.push_solution(Solution::new(agent).unwrap()).unwrap();
    }
    batch
}

fn viewer_at(first_batch: u32) -> ArenaViewer<MockInput> {
    ArenaViewer::new(
        MockInput::new(),
        ViewerConfig {
            first_batch: id(first_batch),
            ..ViewerConfig::default()
        },
    )
}

/// Serve every queued request from `source`, in request order.
fn serve_all<IN: InputProvider>(
    viewer: &mut ArenaViewer<IN>,
    source: &FixtureBatchSource,
    now_ms: u64,
) {
    while let Some(request) = viewer.take_fetch_request() {
        let result = source.fetch_batch(request.batch_id);
        let _ = viewer.complete_fetch(request, result, now_ms);
    }
}

fn loaded_viewer(first_batch: u32, now_ms: u64) -> ArenaViewer<MockInput> {
    let mut viewer = viewer_at(first_batch);
    serve_all(&mut viewer, &FixtureBatchSource::new(100), now_ms);
    viewer
}

#[test]
fn first_batch_is_fetched_and_starts_livestream() {
    let mut viewer = viewer_at(1);
    assert_eq!(viewer.playback_state(), PlaybackState::Idle);

    let request = viewer.take_fetch_request().unwrap();
    assert_eq!(request.batch_id, id(1));
    assert!(viewer.take_fetch_request().is_none());

    let source = FixtureBatchSource::new(10);
    let outcome = viewer.complete_fetch(request, source.fetch_batch(id(1)), 0);
    assert_eq!(outcome, FetchOutcome::Applied);
    assert!(viewer.is_livestreaming());
    assert_eq!(viewer.batch().map(Batch::batch_id), Some(id(1)));
    assert_eq!(viewer.draft(), "1");
}

#[test]
fn previous_at_first_batch_changes_nothing() {
    let mut viewer = loaded_viewer(1, 0);

    assert!(!viewer.previous(10));
    assert_eq!(viewer.batch_id(), id(1));
    assert!(viewer.take_fetch_request().is_none());

    let mut can_previous = None;
    viewer.with_view(10, |view| can_previous = Some(view.can_previous));
    assert_eq!(can_previous, Some(false));
}

#[test]
fn committed_batch_never_drops_below_one() {
    let mut viewer = loaded_viewer(2, 0);
    let source = FixtureBatchSource::new(100);

    let mut now = 0;
    for step in 0..12u64 {
        now += 10;
        match step % 4 {
            0 | 1 => {
                let _ = viewer.previous(now);
            }
            2 => {
                let _ = viewer.next(now);
            }
            _ => {
                let _ = viewer.jump_to(id(1), now);
            }
        }
        serve_all(&mut viewer, &source, now);
        assert!(viewer.batch_id().get() >= 1);
    }
}

#[test]
fn livestream_requests_next_batch_after_interval() {
    let mut viewer = loaded_viewer(5, 1_000);

    assert_eq!(viewer.tick(4_999), TickResult::RenderRequested);
    assert!(viewer.take_fetch_request().is_none());

    let _ = viewer.tick(5_000);
    let request = viewer.take_fetch_request().unwrap();
    assert_eq!(request.batch_id, id(6));

    // Expiry fires once until the next batch lands.
    let _ = viewer.tick(9_500);
    assert!(viewer.take_fetch_request().is_none());
}

#[test]
fn pause_then_resume_keeps_remaining_time() {
    let mut viewer = loaded_viewer(1, 0);

    assert!(!viewer.toggle_livestream(1_500));
    assert_eq!(
        viewer.playback_state(),
        PlaybackState::Paused { remaining_ms: 2_500 }
    );
    let _ = viewer.tick(9_000);
    assert!(viewer.take_fetch_request().is_none());

    assert!(viewer.toggle_livestream(10_000));
    let _ = viewer.tick(12_499);
    assert!(viewer.take_fetch_request().is_none());
    let _ = viewer.tick(12_500);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(2)));
}

#[test]
fn selecting_pauses_and_clearing_does_not_resume() {
    let mut viewer = loaded_viewer(1, 0);
    let agent = viewer.batch().unwrap().solutions()[0].agent.name.clone();

    assert!(viewer.select_solution(agent.as_str(), 1_000));
    assert!(matches!(viewer.playback_state(), PlaybackState::Paused { .. }));
    assert_eq!(viewer.selected_solution(), Some(agent.as_str()));

    assert!(viewer.clear_selection());
    assert!(matches!(viewer.playback_state(), PlaybackState::Paused { .. }));
    let _ = viewer.tick(60_000);
    assert!(viewer.take_fetch_request().is_none());
}

#[test]
fn selecting_before_first_batch_keeps_timer_idle() {
    let mut viewer = viewer_at(1);
    assert!(!viewer.select_solution("Barter", 0));
    assert_eq!(viewer.playback_state(), PlaybackState::Idle);
}

#[test]
fn unknown_agent_is_not_selected() {
    let mut viewer = loaded_viewer(1, 0);
    assert!(!viewer.select_solution("Nobody", 10));
    assert!(viewer.is_livestreaming());
}

#[test]
fn batch_change_clears_selection_even_for_same_agent() {
    let mut viewer = viewer_at(1);
    let first = viewer.take_fetch_request().unwrap();
    viewer.complete_fetch(first, Ok(batch_with_agents(1, &["Barter", "Otex"])), 0);
    assert!(viewer.select_solution("Barter", 100));

    assert!(viewer.next(200));
    assert_eq!(viewer.selected_solution(), None);

    // Reselect on the old batch while the next one is loading.
    assert!(viewer.select_solution("Barter", 300));
    let second = viewer.take_fetch_request().unwrap();
    let outcome = viewer.complete_fetch(second, Ok(batch_with_agents(2, &["Barter"])), 400);
    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(viewer.selected_solution(), None);
}

#[test]
fn typed_digits_debounce_into_one_jump() {
    let mut viewer = loaded_viewer(1, 0);

    viewer.edit_batch_id("1", 0);
    let _ = viewer.tick(100);
    viewer.edit_batch_id("12", 100);
    let _ = viewer.tick(200);
    viewer.edit_batch_id("12a3b", 200);
    assert_eq!(viewer.draft(), "123");

    let _ = viewer.tick(799);
    assert!(viewer.take_fetch_request().is_none());

    let _ = viewer.tick(800);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(123)));
    assert!(viewer.take_fetch_request().is_none());
}

#[test]
fn typed_zero_is_ignored() {
    let mut viewer = loaded_viewer(4, 0);
    viewer.edit_batch_id("0", 0);
    let _ = viewer.tick(1_000);
    assert!(viewer.take_fetch_request().is_none());
    assert_eq!(viewer.batch_id(), id(4));
}

#[test]
fn stale_completion_never_overwrites_newer_batch() {
    let mut viewer = loaded_viewer(2, 0);
    let source = FixtureBatchSource::new(100);

    assert!(viewer.next(10));
    let third = viewer.take_fetch_request().unwrap();
    assert!(viewer.next(20));
    let fourth = viewer.take_fetch_request().unwrap();
    assert_eq!(third.batch_id, id(3));
    assert_eq!(fourth.batch_id, id(4));

    assert_eq!(
        viewer.complete_fetch(fourth, source.fetch_batch(id(4)), 30),
        FetchOutcome::Applied
    );
    assert_eq!(
        viewer.complete_fetch(third, source.fetch_batch(id(3)), 40),
        FetchOutcome::Stale
    );
    assert_eq!(viewer.batch().map(Batch::batch_id), Some(id(4)));
    assert_eq!(viewer.batch_id(), id(4));
}

#[test]
fn failed_fetch_keeps_batch_and_reports_notice() {
    let mut viewer = loaded_viewer(1, 0);

    assert!(viewer.next(10));
    let request = viewer.take_fetch_request().unwrap();
    assert_eq!(
        viewer.complete_fetch(request, Err(FetchError::NotFound), 20),
        FetchOutcome::Failed
    );

    assert_eq!(viewer.batch().map(Batch::batch_id), Some(id(1)));
    assert_eq!(viewer.batch_id(), id(1));
    assert_eq!(viewer.draft(), "1");
    assert_eq!(
        viewer.notice(),
        Some(Notice::FetchFailed {
            batch_id: id(2),
            error: FetchError::NotFound,
        })
    );
    assert!(viewer.take_fetch_request().is_none());

    // The next navigation retries and clears the notice on success.
    assert!(viewer.next(30));
    serve_all(&mut viewer, &FixtureBatchSource::new(10), 40);
    assert_eq!(viewer.batch().map(Batch::batch_id), Some(id(2)));
    assert_eq!(viewer.notice(), None);
}

#[test]
fn mismatched_payload_is_rejected() {
    let mut viewer = viewer_at(3);
    let request = viewer.take_fetch_request().unwrap();
    let outcome = viewer.complete_fetch(request, Ok(batch_with_agents(7, &["Otex"])), 0);

    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(viewer.batch().is_none());
    assert_eq!(viewer.playback_state(), PlaybackState::Idle);
    assert!(matches!(
        viewer.notice(),
        Some(Notice::FetchFailed {
            error: FetchError::Mismatch,
            ..
        })
    ));
}

#[test]
fn shutdown_cancels_pending_work() {
    let mut viewer = loaded_viewer(1, 0);
    assert!(viewer.next(10));
    let in_flight = viewer.take_fetch_request().unwrap();
    viewer.edit_batch_id("9", 20);

    viewer.shutdown();

    let _ = viewer.tick(60_000);
    assert!(viewer.take_fetch_request().is_none());
    assert!(!viewer.is_livestreaming());
    let source = FixtureBatchSource::new(10);
    assert_eq!(
        viewer.complete_fetch(in_flight, source.fetch_batch(id(2)), 60_001),
        FetchOutcome::Stale
    );
}

#[test]
fn resuming_drops_selection() {
    let mut viewer = loaded_viewer(1, 0);
    let agent = viewer.batch().unwrap().solutions()[0].agent.name.clone();
    viewer.select_solution(agent.as_str(), 100);

    assert!(viewer.toggle_livestream(200));
    assert_eq!(viewer.selected_solution(), None);
}

#[test]
fn scripted_input_drives_navigation() {
    let mut raw = RawText::new();
    raw.push_str("x7").unwrap();
    let events = [InputEvent::Next, InputEvent::Next, InputEvent::BatchIdText(raw)];
    let mut viewer = ArenaViewer::new(ScriptedInput::new(&events), ViewerConfig::default());
    serve_all(&mut viewer, &FixtureBatchSource::new(100), 0);

    let _ = viewer.tick(10);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(3)));
    assert!(viewer.take_fetch_request().is_none());

    let mut seen = None;
    viewer.with_view(10, |view| {
        seen = Some((view.committed_batch, view.loading, view.draft.len()));
    });
    assert_eq!(seen, Some((id(3), true, 1)));

    let _ = viewer.tick(610);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(7)));
}

#[test]
fn view_filters_solutions_by_selection() {
    let mut viewer = viewer_at(1);
    let request = viewer.take_fetch_request().unwrap();
    viewer.complete_fetch(request, Ok(batch_with_agents(1, &["Barter", "Otex", "Gnosis"])), 0);

    let mut all = 0;
    viewer.with_view(0, |view| all = view.visible_solutions().count());
    assert_eq!(all, 3);

    viewer.select_solution("Otex", 10);
    let mut visible = None;
    viewer.with_view(10, |view| {
        let mut names = view.visible_solutions().map(Solution::agent_name);
        visible = Some((names.next().map(|n| n.len()), names.next().is_none()));
        assert!(view.is_selected("Otex"));
        assert!(!view.livestreaming);
    });
    assert_eq!(visible, Some((Some(4), true)));
}

#[test]
fn running_countdown_redraws_once_per_second() {
    let mut viewer = loaded_viewer(1, 0);
    assert_eq!(viewer.tick(0), TickResult::RenderRequested);
    assert_eq!(viewer.tick(1), TickResult::NoRender);
    assert_eq!(viewer.tick(500), TickResult::NoRender);
    assert_eq!(viewer.tick(1_001), TickResult::RenderRequested);
    assert_eq!(viewer.tick(1_002), TickResult::NoRender);
}

#[test]
fn rapid_navigation_leaves_one_dispatchable_request() {
    let mut viewer = loaded_viewer(1, 0);
    for step in 1..=5u64 {
        assert!(viewer.next(step * 10));
    }
    assert!(viewer.has_pending_fetch());

    let request = viewer.take_fetch_request().unwrap();
    assert_eq!(request.batch_id, id(6));
    assert!(viewer.take_fetch_request().is_none());
    assert!(viewer.is_current_fetch(request));

    let source = FixtureBatchSource::new(100);
    assert_eq!(
        viewer.complete_fetch(request, source.fetch_batch(id(6)), 100),
        FetchOutcome::Applied
    );
    assert_eq!(viewer.notice(), None);
}

#[test]
fn zero_padded_batch_id_still_jumps() {
    let mut viewer = loaded_viewer(1, 0);
    viewer.edit_batch_id("00000000000000000042", 0);
    assert_eq!(viewer.draft(), "42");

    let _ = viewer.tick(1_000);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(42)));
}

#[test]
fn reset_event_restarts_countdown() {
    let mut viewer = loaded_viewer(1, 0);
    viewer.input_mut().queue(InputEvent::ResetTimer).unwrap();

    let _ = viewer.tick(3_000);
    assert!(viewer.input_mut().is_drained());
    let _ = viewer.tick(6_999);
    assert!(viewer.take_fetch_request().is_none());

    let _ = viewer.tick(7_000);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(2)));
}

#[test]
fn manual_navigation_restarts_countdown() {
    let mut viewer = loaded_viewer(1, 0);

    assert!(viewer.next(3_000));
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(2)));

    // The old deadline passes without an advance.
    let _ = viewer.tick(4_000);
    let _ = viewer.tick(6_999);
    assert!(viewer.take_fetch_request().is_none());

    let _ = viewer.tick(7_000);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(3)));
}

#[test]
fn navigation_while_paused_banks_full_interval() {
    let mut viewer = loaded_viewer(1, 0);
    assert!(!viewer.toggle_livestream(1_000));

    assert!(viewer.next(2_000));
    assert_eq!(
        viewer.playback_state(),
        PlaybackState::Paused { remaining_ms: 4_000 }
    );

    let request = viewer.take_fetch_request().unwrap();
    let source = FixtureBatchSource::new(100);
    let _ = viewer.complete_fetch(request, source.fetch_batch(id(2)), 2_100);
    assert_eq!(
        viewer.playback_state(),
        PlaybackState::Paused { remaining_ms: 4_000 }
    );
    let _ = viewer.tick(60_000);
    assert!(viewer.take_fetch_request().is_none());

    assert!(viewer.toggle_livestream(70_000));
    let _ = viewer.tick(73_999);
    assert!(viewer.take_fetch_request().is_none());
    let _ = viewer.tick(74_000);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(3)));
}

#[test]
fn failed_advance_reports_stalled_livestream() {
    let mut viewer = loaded_viewer(1, 0);
    let _ = viewer.tick(4_000);
    let request = viewer.take_fetch_request().unwrap();

    let mut stalled = None;
    viewer.with_view(4_000, |view| stalled = Some(view.livestream_stalled));
    assert_eq!(stalled, Some(false));

    let _ = viewer.complete_fetch(request, Err(FetchError::Transport), 4_100);
    viewer.with_view(4_100, |view| {
        stalled = Some(view.livestream_stalled);
        assert!(view.livestreaming);
    });
    assert_eq!(stalled, Some(true));

    // Pause and resume retries right away.
    assert!(!viewer.toggle_livestream(5_000));
    assert!(viewer.toggle_livestream(5_001));
    let _ = viewer.tick(5_001);
    assert_eq!(viewer.take_fetch_request().map(|r| r.batch_id), Some(id(2)));
    viewer.with_view(5_001, |view| stalled = Some(view.livestream_stalled));
    assert_eq!(stalled, Some(false));
}
