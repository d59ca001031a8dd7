//! Playback of a finished run, as plain data.

use std::time::Duration;

use crate::grids::Cell;
use crate::runner::{Outcome, RunResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub at: Duration,
    pub bunny: Cell,
    /// square to highlight as the upcoming hop
    pub next: Option<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    frames: Vec<Frame>,
    settle_at: Duration,
    outcome: Outcome,
}

impl Timeline {
    /// One frame per square of `result.traversed`, `step` apart. After the
    /// last frame the timeline holds for `hold` before it settles.
    pub fn from_run(result: &RunResult, step: Duration, hold: Duration) -> Self {
        let path = &result.traversed;
        let frames = path
            .iter()
            .enumerate()
            .map(|(index, cell)| Frame {
                at: step * index as u32,
                bunny: *cell,
                next: match path.get(index + 1) {
                    Some(next) => Some(*next),
                    None => result.blocked_at,
                },
            })
            .collect();

        Self {
            frames,
            settle_at: step * path.len() as u32 + hold,
            outcome: result.outcome,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// When playback is over and the board goes back to its resting state.
    pub fn settle_at(&self) -> Duration {
        self.settle_at
    }

    pub fn frame_at(&self, elapsed: Duration) -> Option<&Frame> {
        self.frames.iter().take_while(|frame| frame.at <= elapsed).last()
    }

    pub fn is_settled(&self, elapsed: Duration) -> bool {
        elapsed >= self.settle_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState<'a> {
    Showing(&'a Frame),
    Settled(Outcome),
    Cancelled,
}

/// A timeline being played. Cancelling drops whatever is left of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    timeline: Timeline,
    cancelled: bool,
}

impl Playback {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            cancelled: false,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn poll(&self, elapsed: Duration) -> PlaybackState<'_> {
        if self.cancelled {
            return PlaybackState::Cancelled;
        }
        if self.timeline.is_settled(elapsed) {
            return PlaybackState::Settled(self.timeline.outcome());
        }

        match self.timeline.frame_at(elapsed) {
            Some(frame) => PlaybackState::Showing(frame),
            // a timeline always starts at zero, only reachable with no frames
            None => PlaybackState::Settled(self.timeline.outcome()),
        }
    }
}
