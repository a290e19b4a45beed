//! Resting-place replay.
//!
//! When a board is remounted mid-campaign, the pointer jumps back to where
//! the last spin left it by quickly walking the highlight from tile 0 up to
//! the persisted index. Replay always runs to completion before a spin
//! starts.

use crate::pace::{Frame, StepPace};

/// Walks the highlight from tile 0 to the persisted resting tile.
///
/// A resting index of zero completes immediately and emits no frames. The
/// pace is sampled once at construction; replay never mutates the buffer.
#[derive(Clone, Debug)]
pub struct ReplaySequencer {
    cursor: usize,
    last: usize,
    hold_ms: u64,
    done: bool,
}

impl ReplaySequencer {
    pub fn new(last_index: usize, pace: &StepPace) -> Self {
        Self {
            cursor: 0,
            last: last_index,
            hold_ms: pace.hold_ms(),
            done: last_index == 0,
        }
    }

    /// Next frame to show, or `None` once the resting tile was highlighted.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        let frame = Frame {
            index: self.cursor,
            hold_ms: self.hold_ms,
        };
        if self.cursor == self.last {
            self.done = true;
        } else {
            self.cursor += 1;
        }
        Some(frame)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut seq: ReplaySequencer) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = seq.next_frame() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn zero_index_completes_immediately() {
        let mut seq = ReplaySequencer::new(0, &StepPace::new(100, 50, 5));
        assert!(seq.is_done());
        assert_eq!(seq.next_frame(), None);
    }

    #[test]
    fn replays_zero_through_last_inclusive() {
        let frames = drain(ReplaySequencer::new(5, &StepPace::new(100, 50, 5)));
        let indices: Vec<usize> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn hold_is_constant_and_includes_the_buffer() {
        let frames = drain(ReplaySequencer::new(3, &StepPace::new(100, 50, 5)));
        assert!(frames.iter().all(|f| f.hold_ms == 350));

        let frames = drain(ReplaySequencer::new(3, &StepPace::new(40, 50, 0)));
        assert!(frames.iter().all(|f| f.hold_ms == 40));
    }

    #[test]
    fn done_stays_done() {
        let mut seq = ReplaySequencer::new(1, &StepPace::new(100, 50, 0));
        assert!(seq.next_frame().is_some());
        assert!(seq.next_frame().is_some());
        assert!(seq.is_done());
        assert_eq!(seq.next_frame(), None);
        assert_eq!(seq.next_frame(), None);
    }
}
