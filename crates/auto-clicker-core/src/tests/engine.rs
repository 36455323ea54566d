use crate::{
    ClickPlan, ClickTiming, Clicker, CoreError, CoreResult, EngineState, MouseButton,
    PlaybackEngine, Sequence, SequenceMeta, Step,
};

use std::{
    panic::Location,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use rand::{SeedableRng, rngs::StdRng};

const SEED: u64 = 7;
const STATE_WAIT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
struct RecordedClick {
    x: i32,
    y: i32,
    button: MouseButton,
    count: u8,
    at: Instant,
}

/// Clicker that records every call instead of touching the pointer.
#[derive(Clone)]
struct MockClicker {
    cursor: (i32, i32),
    clicks: Arc<Mutex<Vec<RecordedClick>>>,
}

impl MockClicker {
    fn new(cursor: (i32, i32)) -> (Self, Arc<Mutex<Vec<RecordedClick>>>) {
        let clicks = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                cursor,
                clicks: Arc::clone(&clicks),
            },
            clicks,
        )
    }
}

#[allow(clippy::unwrap_used)]
impl Clicker for MockClicker {
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn click(&mut self, button: MouseButton, count: u8) -> CoreResult<()> {
        self.clicks.lock().unwrap().push(RecordedClick {
            x: self.cursor.0,
            y: self.cursor.1,
            button,
            count,
            at: Instant::now(),
        });
        Ok(())
    }

    fn position(&mut self) -> CoreResult<(i32, i32)> {
        Ok(self.cursor)
    }
}

/// Clicker whose every click fails.
struct FailingClicker;

impl Clicker for FailingClicker {
    fn move_to(&mut self, _x: i32, _y: i32) -> CoreResult<()> {
        Ok(())
    }

    fn click(&mut self, _button: MouseButton, _count: u8) -> CoreResult<()> {
        Err(CoreError::PointerDevice {
            reason: "simulated device failure".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn position(&mut self) -> CoreResult<(i32, i32)> {
        Ok((0, 0))
    }
}

fn wait_for(mut condition: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

fn three_step_plan(inter_delay_ms: u64, repeats: u32) -> ClickPlan {
    ClickPlan {
        sequence: Sequence {
            meta: SequenceMeta {
                inter_delay_ms,
                repeats,
                ..SequenceMeta::default()
            },
            steps: vec![Step::at(1, 10), Step::at(2, 20), Step::at(3, 30)],
        },
        timing: ClickTiming {
            max_cps: 1000,
            ..ClickTiming::default()
        },
    }
}

/// WHAT: Three steps with repeats=2 issue exactly 6 clicks and self-terminate
/// WHY: Finite repeat semantics: full passes in step order, then Idle without Stop
#[test]
#[allow(clippy::unwrap_used)]
fn given_three_steps_twice_when_playing_then_six_clicks_in_order_and_idle() {
    // Given: 3 steps, 50ms inter-delay override, 2 passes
    let (clicker, clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();

    // When: Playback runs to completion on its own
    assert!(engine.start(three_step_plan(50, 2), move || Ok(clicker), StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));

    // Then: Exactly 6 clicks, two passes in step order, spacing >= 50ms
    let clicks = clicks.lock().unwrap();
    assert_eq!(clicks.len(), 6);
    let xs: Vec<i32> = clicks.iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![1, 2, 3, 1, 2, 3]);
    for pair in clicks.windows(2) {
        assert!(pair[1].at - pair[0].at >= Duration::from_millis(50));
    }
}

/// WHAT: Start while running is a no-op
/// WHY: At most one worker context may exist at a time
#[test]
fn given_running_engine_when_starting_again_then_noop() {
    // Given: An engine running an infinite plan
    let (clicker, _clicks) = MockClicker::new((0, 0));
    let (second, _second_clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();
    assert!(engine.start(three_step_plan(20, 0), move || Ok(clicker), StdRng::seed_from_u64(SEED)));

    // When: Starting again while Running
    let started = engine.start(three_step_plan(20, 0), move || Ok(second), StdRng::seed_from_u64(SEED));

    // Then: The second start is refused
    assert!(!started);
    engine.stop();
    assert_eq!(engine.state(), EngineState::Idle);
}

/// WHAT: repeats=0 runs until Stop, and Stop reaches Idle within the join window
/// WHY: Infinite passes are only terminated by the cooperative stop signal
#[test]
#[allow(clippy::unwrap_used)]
fn given_infinite_repeats_when_stopping_then_idle_within_bounded_join() {
    // Given: An infinite plan that has already issued clicks
    let (clicker, clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();
    assert!(engine.start(three_step_plan(10, 0), move || Ok(clicker), StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| clicks.lock().unwrap().len() >= 4, STATE_WAIT));
    assert_eq!(engine.state(), EngineState::Running);

    // When: Stopping
    let before = Instant::now();
    engine.stop();

    // Then: The call returns within the documented window and state is Idle
    assert!(before.elapsed() < Duration::from_secs(2));
    assert_eq!(engine.state(), EngineState::Idle);
}

/// WHAT: Pausing mid-pass suspends clicks and resumes the unfinished pass
/// WHY: Pause must not restart the pass or skip steps
#[test]
#[allow(clippy::unwrap_used)]
fn given_pause_mid_pass_when_resuming_then_pass_continues_from_next_step() {
    // Given: One pass of 3 steps with 150ms spacing, paused after the first click
    let (clicker, clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();
    assert!(engine.start(three_step_plan(150, 1), move || Ok(clicker), StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| !clicks.lock().unwrap().is_empty(), STATE_WAIT));

    // When: Pausing (the step already past its boundary may still land)
    assert_eq!(engine.toggle_pause(), EngineState::Paused);
    std::thread::sleep(Duration::from_millis(250));
    let while_paused = clicks.lock().unwrap().len();
    std::thread::sleep(Duration::from_millis(400));

    // Then: No further clicks while paused, and the pass finishes in
    // order after resuming -- 3 clicks total, not a restarted pass
    assert_eq!(clicks.lock().unwrap().len(), while_paused);
    assert!(while_paused < 3);
    assert_eq!(engine.toggle_pause(), EngineState::Running);
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));
    let xs: Vec<i32> = clicks.lock().unwrap().iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![1, 2, 3]);
}

/// WHAT: An empty sequence clicks at the current cursor position
/// WHY: Single-point cursor-click mode is the documented empty-sequence behavior
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_sequence_when_playing_then_clicks_at_cursor() {
    // Given: No recorded steps and a cursor parked at (5, 7)
    let (clicker, clicks) = MockClicker::new((5, 7));
    let mut engine = PlaybackEngine::new();
    let plan = ClickPlan {
        sequence: Sequence::default(),
        timing: ClickTiming {
            base_interval_ms: 20,
            max_cps: 1000,
            ..ClickTiming::default()
        },
    };

    // When: Playback runs for a few intervals
    assert!(engine.start(plan, move || Ok(clicker), StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| clicks.lock().unwrap().len() >= 3, STATE_WAIT));
    engine.stop();

    // Then: Every click is a single left click at the cursor
    for click in clicks.lock().unwrap().iter() {
        assert_eq!((click.x, click.y), (5, 7));
        assert_eq!(click.button, MouseButton::Left);
        assert_eq!(click.count, 1);
    }
}

/// WHAT: Double-click mode issues two rapid clicks per step
/// WHY: The click count is part of the issuance contract
#[test]
#[allow(clippy::unwrap_used)]
fn given_double_click_mode_when_playing_then_count_is_two() {
    // Given: One step with double-click enabled
    let (clicker, clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();
    let plan = ClickPlan {
        sequence: Sequence {
            meta: SequenceMeta {
                repeats: 1,
                ..SequenceMeta::default()
            },
            steps: vec![Step::at(9, 9)],
        },
        timing: ClickTiming {
            double_click: true,
            max_cps: 1000,
            ..ClickTiming::default()
        },
    };

    // When: The single pass completes
    assert!(engine.start(plan, move || Ok(clicker), StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));

    // Then: One click call with count 2
    let clicks = clicks.lock().unwrap();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].count, 2);
}

/// WHAT: Pixel jitter keeps clicks within the configured radius
/// WHY: Documented bound on click displacement
#[test]
#[allow(clippy::unwrap_used)]
fn given_jitter_when_playing_then_clicks_within_radius() {
    // Given: Repeated clicks on one step with 2px jitter
    let (clicker, clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();
    let plan = ClickPlan {
        sequence: Sequence {
            meta: SequenceMeta {
                inter_delay_ms: 5,
                repeats: 10,
                ..SequenceMeta::default()
            },
            steps: vec![Step::at(100, 200)],
        },
        timing: ClickTiming {
            jitter_px: 2,
            max_cps: 1000,
            ..ClickTiming::default()
        },
    };

    // When: All passes complete
    assert!(engine.start(plan, move || Ok(clicker), StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));

    // Then: Every click lands within +/-2px on each axis
    let clicks = clicks.lock().unwrap();
    assert_eq!(clicks.len(), 10);
    for click in clicks.iter() {
        assert!((98..=102).contains(&click.x));
        assert!((198..=202).contains(&click.y));
    }
}

/// WHAT: Click failures are swallowed and the loop terminates cleanly
/// WHY: The unattended loop must never raise outward or stick in Running
#[test]
fn given_failing_clicker_when_playing_then_loop_survives_and_stops_clean() {
    // Given: A clicker whose every click errors
    let mut engine = PlaybackEngine::new();

    // When: A finite plan runs against it
    assert!(engine.start(three_step_plan(10, 2), || Ok(FailingClicker), StdRng::seed_from_u64(SEED)));

    // Then: The loop still completes its passes and ends Idle
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));
}

/// WHAT: The engine can be started again after a self-terminated run
/// WHY: Loop exit must fully release the single worker slot
#[test]
#[allow(clippy::unwrap_used)]
fn given_self_terminated_run_when_starting_again_then_accepted() {
    // Given: A finite run that ended on its own
    let (clicker, clicks) = MockClicker::new((0, 0));
    let mut engine = PlaybackEngine::new();
    assert!(engine.start(three_step_plan(5, 1), { let c = clicker.clone(); move || Ok(c) }, StdRng::seed_from_u64(SEED)));
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));
    let after_first = clicks.lock().unwrap().len();

    // When: Starting a second run
    let started = engine.start(three_step_plan(5, 1), move || Ok(clicker), StdRng::seed_from_u64(SEED));

    // Then: The second run is accepted and clicks again
    assert!(started);
    assert!(wait_for(|| engine.state() == EngineState::Idle, STATE_WAIT));
    assert_eq!(clicks.lock().unwrap().len(), after_first + 3);
}
