use crate::sequence::{SequenceMeta, Step};

use serde::{Deserialize, Serialize};

/// An ordered list of steps plus its metadata.
///
/// Step order is playback order. An empty step list signals "no
/// recorded sequence" and switches the engine to single-point
/// cursor-click mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Descriptive and execution-override metadata.
    #[serde(default)]
    pub meta: SequenceMeta,
    /// Planned clicks in playback order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Sequence {
    /// Whether no steps have been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step at the end of the playback order.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Swap a step with its neighbour (`delta` of -1 or +1).
    ///
    /// Out-of-range moves are ignored; the remaining order is preserved.
    pub fn move_step(&mut self, index: usize, delta: isize) {
        let Some(target) = index.checked_add_signed(delta) else {
            return;
        };
        if index < self.steps.len() && target < self.steps.len() {
            self.steps.swap(index, target);
        }
    }

    /// Remove the step at `index`; out-of-range deletes are ignored.
    pub fn delete_step(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    /// Drop all steps, keeping the metadata.
    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
