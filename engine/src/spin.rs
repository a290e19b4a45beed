//! The spin itself.
//!
//! A spin walks the highlight a configured number of full laps around the
//! ring and then on to the target tile, so the pointer always lands exactly
//! where the backend said it must. Speed comes from the pace buffer: fast
//! start, slow coast into the landing tile.

use crate::pace::{Frame, StepPace};

/// Walks the highlight `laps` times around the ring plus the offset to the
/// target tile.
///
/// Emits `total_steps() + 1` frames (the cursor runs 0..=total). The frame
/// for cursor `k` is held for the pace as of entering `k`; the buffer
/// bookkeeping for the advance to `k + 1` lands on the following frame.
#[derive(Clone, Debug)]
pub struct SpinSequencer {
    cursor: u64,
    total: u64,
    ring_len: usize,
    target: usize,
    pace: StepPace,
    done: bool,
}

impl SpinSequencer {
    /// `ring_len` must be nonzero; `target_index` is a tile on that ring.
    pub fn new(ring_len: usize, target_index: usize, laps: u32, pace: StepPace) -> Self {
        debug_assert!(ring_len > 0);
        debug_assert!(target_index < ring_len);
        let total = (laps as u64)
            .saturating_mul(ring_len as u64)
            .saturating_add(target_index as u64);
        Self {
            cursor: 0,
            total,
            ring_len,
            target: target_index,
            pace,
            done: false,
        }
    }

    /// Cursor advances in this spin; one less than the frame count.
    pub fn total_steps(&self) -> u64 {
        self.total
    }

    /// Tile the spin lands on.
    pub fn target_index(&self) -> usize {
        self.target
    }

    /// Next frame to show, or `None` once the landing frame was emitted.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        let frame = Frame {
            index: (self.cursor % self.ring_len as u64) as usize,
            hold_ms: self.pace.hold_ms(),
        };
        if self.cursor == self.total {
            // Landed: cursor and buffer go back to zero.
            self.done = true;
            self.cursor = 0;
            self.pace.reset();
        } else {
            self.cursor += 1;
            self.pace.after_advance(self.cursor, self.total);
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

    fn drain(mut seq: SpinSequencer) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = seq.next_frame() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn total_steps_is_laps_times_ring_plus_target() {
        let seq = SpinSequencer::new(8, 5, 3, StepPace::new(100, 50, 5));
        assert_eq!(seq.total_steps(), 29);
        assert_eq!(seq.target_index(), 5);

        let seq = SpinSequencer::new(12, 0, 1, StepPace::new(100, 50, 0));
        assert_eq!(seq.total_steps(), 12);
    }

    #[test]
    fn emits_one_more_frame_than_total_steps() {
        let seq = SpinSequencer::new(8, 5, 3, StepPace::new(100, 50, 5));
        let expected = seq.total_steps() + 1;
        assert_eq!(drain(seq).len() as u64, expected);
    }

    #[test]
    fn frames_wrap_the_ring_and_land_on_the_target() {
        let frames = drain(SpinSequencer::new(8, 5, 3, StepPace::new(1, 1, 0)));
        // Indices walk 0..8 repeatedly, then stop exactly at the target.
        for (k, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, k % 8);
        }
        assert_eq!(frames.last().map(|f| f.index), Some(5));
    }

    #[test]
    fn landing_on_tile_zero_still_spins_full_laps() {
        let frames = drain(SpinSequencer::new(8, 0, 3, StepPace::new(1, 1, 0)));
        assert_eq!(frames.len(), 25);
        assert_eq!(frames.last().map(|f| f.index), Some(0));
    }

    #[test]
    fn holds_ease_in_then_coast_out() {
        let frames = drain(SpinSequencer::new(8, 5, 3, StepPace::new(100, 50, 5)));
        let holds: Vec<u64> = frames.iter().map(|f| f.hold_ms).collect();
        assert_eq!(holds.len(), 30);
        // Opening window: the initial buffer burns down one unit per frame.
        assert_eq!(holds[..6], [350, 300, 250, 200, 150, 100]);
        // Mid-spin runs at the base step.
        assert!(holds[6..20].iter().all(|&h| h == 100));
        // Closing window: one unit added per frame, landing at the slowest.
        assert_eq!(holds[20..], [150, 200, 250, 300, 350, 400, 450, 500, 550, 600]);
    }

    #[test]
    fn sequencer_resets_after_landing() {
        let mut seq = SpinSequencer::new(8, 5, 3, StepPace::new(100, 50, 5));
        while seq.next_frame().is_some() {}
        assert!(seq.is_done());
        assert_eq!(seq.next_frame(), None);
    }

    #[test]
    fn extreme_laps_saturate_instead_of_wrapping() {
        let seq = SpinSequencer::new(usize::MAX, 0, u32::MAX, StepPace::new(1, 1, 0));
        assert_eq!(seq.total_steps(), u64::MAX);
    }
}
