//! Modifier-hold capture state machine.
//!
//! A started session is Armed; holding the capture modifier switches it
//! to Capturing, and every pointer click while the modifier is held
//! appends one step. Releasing the modifier (or a manual finish
//! trigger) finalizes the capture and hands the sequence back to the
//! caller, which owns snapshotting and any save dialog.

use crate::{
    recording::CaptureEvent,
    sequence::{Sequence, Step},
};

use tracing::{debug, info, instrument};

/// Recording session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// No capture in progress.
    Idle,
    /// Started; waiting for the modifier to be held.
    Armed,
    /// Modifier held; clicks are being captured.
    Capturing,
    /// Finalizing; transient within [`RecordingSession::finish`].
    Finishing,
}

/// Event-driven capture session. Owned and driven exclusively by the
/// coordinating task.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: State,
    sequence: Sequence,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Armed,
    Capturing,
}

impl RecordingSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> RecordingState {
        match self.state {
            State::Idle => RecordingState::Idle,
            State::Armed => RecordingState::Armed,
            State::Capturing => RecordingState::Capturing,
        }
    }

    /// Whether a capture is in progress (Armed or Capturing).
    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Steps captured so far.
    pub fn steps(&self) -> &[Step] {
        &self.sequence.steps
    }

    /// Begin a capture: clears any previously captured steps and
    /// metadata and arms the session. No-op (returns false) when a
    /// capture is already in progress.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            debug!("Start ignored: capture already in progress");
            return false;
        }
        self.sequence = Sequence::default();
        self.state = State::Armed;
        info!("Recording armed: hold the capture modifier and click");
        true
    }

    /// Feed one raw input event into the state machine.
    ///
    /// Returns the finished sequence when this event completed the
    /// capture (modifier released while capturing); `None` otherwise.
    /// Clicks arriving while the modifier is not held are ignored.
    pub fn handle_event(&mut self, event: CaptureEvent) -> Option<Sequence> {
        match (&self.state, event) {
            (State::Armed, CaptureEvent::ModifierPressed) => {
                self.state = State::Capturing;
                debug!("Capture modifier held, recording clicks");
                None
            }
            (State::Capturing, CaptureEvent::Click { x, y, button }) => {
                self.sequence.push(Step {
                    x,
                    y,
                    delay_ms: 0,
                    button,
                });
                debug!(x, y, ?button, count = self.sequence.steps.len(), "Step captured");
                None
            }
            (State::Capturing, CaptureEvent::ModifierReleased) => self.finish(),
            _ => None,
        }
    }

    /// Finalize the capture and return the recorded sequence.
    ///
    /// Reachable from Armed or Capturing (manual finish trigger) as
    /// well as via modifier release. Idempotent: returns `None` when
    /// already Idle.
    #[instrument(skip(self))]
    pub fn finish(&mut self) -> Option<Sequence> {
        if !self.is_active() {
            return None;
        }
        // Finishing is transient: the session passes through it and
        // lands on Idle before this method returns.
        self.state = State::Idle;
        let sequence = std::mem::take(&mut self.sequence);
        info!(steps = sequence.steps.len(), "Recording finished");
        Some(sequence)
    }
}
