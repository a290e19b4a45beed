//! Frame pacing for the pointer sequencers.
//!
//! The pointer's speed is not eased by a curve; it is driven by a discrete
//! buffer counter. Every frame is held for `step_ms + buffer * unit_ms`.
//! During the first frames of a spin the buffer burns down to zero (the
//! pointer picks up speed), and during the last frames it builds back up
//! (the pointer coasts into the landing tile).

/// Frames at each end of a spin inside which the buffer eases the pace.
pub const EASE_WINDOW: u64 = 10;

/// One sequencer advance: the tile to highlight and how long to hold it
/// before the next advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub hold_ms: u64,
}

/// Buffer-counter pacing state.
///
/// All arithmetic saturates; a hostile configuration slows the pointer down
/// rather than wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPace {
    step_ms: u64,
    unit_ms: u64,
    buffer: u32,
}

impl StepPace {
    pub fn new(step_ms: u64, unit_ms: u64, buffer: u32) -> Self {
        Self {
            step_ms,
            unit_ms,
            buffer,
        }
    }

    /// Interval the current frame is held.
    #[inline]
    pub fn hold_ms(&self) -> u64 {
        self.step_ms
            .saturating_add((self.buffer as u64).saturating_mul(self.unit_ms))
    }

    /// Current buffer value, in units.
    #[inline]
    pub fn buffer(&self) -> u32 {
        self.buffer
    }

    /// Apply the per-advance bookkeeping for the cursor value just reached.
    ///
    /// Inside the opening window the buffer decrements (floored at zero);
    /// inside the closing window it increments. Both apply on short paths
    /// where the windows overlap.
    pub fn after_advance(&mut self, cursor: u64, total_steps: u64) {
        if cursor < EASE_WINDOW && self.buffer != 0 {
            self.buffer -= 1;
        }
        if cursor > total_steps.saturating_sub(EASE_WINDOW) {
            self.buffer = self.buffer.saturating_add(1);
        }
    }

    /// Clear the buffer once a spin lands.
    pub fn reset(&mut self) {
        self.buffer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_is_step_plus_buffer_units() {
        let pace = StepPace::new(100, 50, 5);
        assert_eq!(pace.hold_ms(), 350);
        assert_eq!(StepPace::new(100, 50, 0).hold_ms(), 100);
        assert_eq!(StepPace::new(20, 1, 3).hold_ms(), 23);
    }

    #[test]
    fn opening_window_burns_the_buffer_down_to_zero() {
        let mut pace = StepPace::new(100, 50, 5);
        let mut holds = Vec::new();
        for cursor in 1..=9u64 {
            holds.push(pace.hold_ms());
            pace.after_advance(cursor, 100);
        }
        assert_eq!(holds[..6], [350, 300, 250, 200, 150, 100]);
        // Floored at zero for the rest of the window.
        assert_eq!(pace.buffer(), 0);
        assert_eq!(pace.hold_ms(), 100);
    }

    #[test]
    fn closing_window_builds_the_buffer_back_up() {
        let mut pace = StepPace::new(100, 50, 0);
        let total = 29u64;
        for cursor in 1..=total {
            pace.after_advance(cursor, total);
        }
        // Advances 20..=29 sit inside the closing window.
        assert_eq!(pace.buffer(), 10);
        assert_eq!(pace.hold_ms(), 600);
    }

    #[test]
    fn overlapping_windows_apply_both_rules() {
        // total_steps = 13: advances 1..=3 only decrement, 4..=9 decrement
        // and increment (net zero), 10..=13 only increment.
        let mut pace = StepPace::new(100, 50, 5);
        let total = 13u64;
        let mut buffers = Vec::new();
        for cursor in 1..=total {
            pace.after_advance(cursor, total);
            buffers.push(pace.buffer());
        }
        assert_eq!(buffers, vec![4, 3, 2, 2, 2, 2, 2, 2, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn short_paths_treat_every_advance_as_closing() {
        // total_steps below the window: the subtraction saturates and every
        // advance increments.
        let mut pace = StepPace::new(100, 50, 0);
        for cursor in 1..=5u64 {
            pace.after_advance(cursor, 5);
        }
        assert_eq!(pace.buffer(), 5);
    }

    #[test]
    fn arithmetic_saturates_instead_of_wrapping() {
        let pace = StepPace::new(u64::MAX, u64::MAX, u32::MAX);
        assert_eq!(pace.hold_ms(), u64::MAX);

        // Increment at the cap stays at the cap.
        let mut pace = StepPace::new(0, 0, u32::MAX);
        pace.after_advance(100, 10);
        assert_eq!(pace.buffer(), u32::MAX);
    }

    #[test]
    fn reset_clears_the_buffer() {
        let mut pace = StepPace::new(100, 50, 7);
        pace.reset();
        assert_eq!(pace.buffer(), 0);
        assert_eq!(pace.hold_ms(), 100);
    }
}
