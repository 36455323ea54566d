//! Timed click loop with cooperative start/pause/stop.
//!
//! The engine owns one worker thread at a time. The worker polls shared
//! atomic flags at every step boundary; its only blocking points are the
//! inter-click sleep and the 50 ms pause poll, so stop latency is
//! bounded by the longest configured delay. Stop joins the worker with a
//! bounded wait and forces Idle client-side on timeout.

use crate::{
    playback::{ClickTiming, Clicker, apply_jitter, human_delay},
    sequence::{MouseButton, Sequence},
};

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// Poll interval while paused, and while waiting for the worker to wind
/// down after a stop.
const PAUSE_POLL: Duration = Duration::from_millis(50);

/// Bounded wait for the worker thread to exit after stop is signalled.
const STOP_JOIN_TIMEOUT: Duration = Duration::from_millis(1500);

/// Playback engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No click loop is running.
    Idle,
    /// The click loop is issuing clicks.
    Running,
    /// The click loop is alive but skipping clicks.
    Paused,
}

/// Everything the worker needs for one playback run.
#[derive(Debug, Clone, Default)]
pub struct ClickPlan {
    /// Steps and execution-override metadata. An empty step list means
    /// "click at the current cursor position".
    pub sequence: Sequence,
    /// Timing and safety settings.
    pub timing: ClickTiming,
}

/// Cooperative playback state machine.
///
/// Single-instance by ownership: starting while Running is a no-op, so
/// at most one worker thread exists at a time. All control methods are
/// meant to be called from the single coordinating task; the worker
/// communicates only through the shared flags.
pub struct PlaybackEngine {
    running: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            paused: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Current state, derived from the shared flags.
    ///
    /// The running flag is cleared by the worker's drop guard, so a
    /// loop that terminated on its own (finite repeats) reads Idle here
    /// without an explicit stop.
    pub fn state(&self) -> EngineState {
        if !self.running.load(Ordering::Acquire) {
            EngineState::Idle
        } else if self.paused.load(Ordering::Acquire) {
            EngineState::Paused
        } else {
            EngineState::Running
        }
    }

    /// Start the click loop. No-op (returns false) when already running.
    ///
    /// `make_clicker` runs on the worker thread, because pointer device
    /// handles (enigo) are not `Send` and must be created where they
    /// are used. A factory failure is logged and leaves the engine Idle.
    #[instrument(skip_all)]
    pub fn start<C, F, R>(&mut self, plan: ClickPlan, make_clicker: F, rng: R) -> bool
    where
        C: Clicker,
        F: FnOnce() -> crate::CoreResult<C> + Send + 'static,
        R: Rng + Send + 'static,
    {
        if self.running.load(Ordering::Acquire) {
            debug!("Start ignored: already running");
            return false;
        }
        self.reap_finished_worker();

        self.stop.store(false, Ordering::Release);
        self.paused.store(false, Ordering::Release);
        self.running.store(true, Ordering::Release);

        let running = Arc::clone(&self.running);
        let stop = Arc::clone(&self.stop);
        let paused = Arc::clone(&self.paused);

        self.worker = Some(std::thread::spawn(move || {
            // Clears the running flag on every exit path, so the engine
            // can never report Running after the loop has ended.
            let _guard = RunningGuard(running);
            match make_clicker() {
                Ok(clicker) => run_loop(plan, clicker, rng, &stop, &paused),
                Err(e) => warn!(error = %e, "Could not create clicker, playback aborted"),
            }
        }));

        info!("Playback started");
        true
    }

    /// Toggle between Running and Paused. No-op when Idle.
    #[instrument(skip(self))]
    pub fn toggle_pause(&self) -> EngineState {
        if self.running.load(Ordering::Acquire) {
            let was_paused = self.paused.fetch_xor(true, Ordering::AcqRel);
            info!(paused = !was_paused, "Pause toggled");
        }
        self.state()
    }

    /// Signal the worker to stop and wait for it, bounded.
    ///
    /// The worker observes the stop flag at its next wake-up. If it has
    /// not exited within the join window (e.g. a long configured delay
    /// is still sleeping), the handle is dropped and state is forced to
    /// Idle; the thread winds down on its own afterwards.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        self.paused.store(false, Ordering::Release);

        if let Some(handle) = self.worker.take() {
            let deadline = Instant::now() + STOP_JOIN_TIMEOUT;
            while !handle.is_finished() && Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(10));
            }
            if handle.is_finished() {
                if handle.join().is_err() {
                    warn!("Playback worker panicked");
                }
                info!("Playback stopped");
            } else {
                warn!("Playback worker did not stop within timeout, forcing Idle");
            }
        }

        // Forced Idle client-side; harmless when the worker exited cleanly.
        self.running.store(false, Ordering::Release);
    }

    // A worker that terminated on its own (finite repeats) leaves a
    // finished handle behind; join it before spawning the next one.
    fn reap_finished_worker(&mut self) {
        if let Some(handle) = self.worker.take_if(|h| h.is_finished())
            && handle.join().is_err()
        {
            warn!("Previous playback worker panicked");
        }
    }
}

struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The worker body. Never returns an error: click failures are logged
/// and swallowed so unattended playback keeps going or exits cleanly.
fn run_loop<C: Clicker, R: Rng>(
    plan: ClickPlan,
    mut clicker: C,
    mut rng: R,
    stop: &AtomicBool,
    paused: &AtomicBool,
) {
    let timing = plan.timing;

    if plan.sequence.is_empty() {
        // Single-point mode: click wherever the cursor currently is.
        while !stop.load(Ordering::Acquire) {
            if paused.load(Ordering::Acquire) {
                std::thread::sleep(PAUSE_POLL);
                continue;
            }
            match clicker.position() {
                Ok((x, y)) => issue_click(&mut clicker, MouseButton::Left, x, y, &timing, &mut rng),
                Err(e) => warn!(error = %e, "Could not read cursor position"),
            }
            std::thread::sleep(human_delay(timing.base_interval_ms, &timing, &mut rng));
        }
        return;
    }

    let meta = &plan.sequence.meta;
    let inter = (meta.inter_delay_ms > 0).then_some(meta.inter_delay_ms);
    let repeats = (meta.repeats > 0).then_some(meta.repeats);
    let mut passes_done: u32 = 0;

    'outer: while !stop.load(Ordering::Acquire) {
        for step in &plan.sequence.steps {
            if stop.load(Ordering::Acquire) {
                break 'outer;
            }
            // A pause suspends the pass at this step boundary; the
            // unfinished pass resumes here, not from the beginning.
            while paused.load(Ordering::Acquire) && !stop.load(Ordering::Acquire) {
                std::thread::sleep(PAUSE_POLL);
            }
            let delay = inter.unwrap_or(step.delay_ms);
            std::thread::sleep(human_delay(delay, &timing, &mut rng));
            issue_click(&mut clicker, step.button, step.x, step.y, &timing, &mut rng);
        }
        passes_done += 1;
        if repeats.is_some_and(|r| passes_done >= r) {
            debug!(passes = passes_done, "Repeat count reached");
            break;
        }
    }
}

fn issue_click<C: Clicker>(
    clicker: &mut C,
    button: MouseButton,
    x: i32,
    y: i32,
    timing: &ClickTiming,
    rng: &mut impl Rng,
) {
    let (x, y) = apply_jitter(x, y, timing.jitter_px, rng);
    let count = if timing.double_click { 2 } else { 1 };
    let result = clicker
        .move_to(x, y)
        .and_then(|()| clicker.click(button, count));
    if let Err(e) = result {
        warn!(error = %e, x, y, "Click failed, continuing");
    }
}
