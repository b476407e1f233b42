//! Edge detection over sampled input

/// Rising-edge detector for a held key or button
///
/// Fires once on the transition from released to held and stays quiet while
/// the input keeps being held.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    previous: bool,
}

impl EdgeTrigger {
    /// Create a released trigger
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current raw state; returns `true` on a rising edge
    pub fn update(&mut self, held: bool) -> bool {
        let fired = held && !self.previous;
        self.previous = held;
        fired
    }

    /// Forget the previous state, as if the input had been released
    pub fn reset(&mut self) {
        self.previous = false;
    }
}

/// Turns absolute cursor positions into per-frame deltas
///
/// The first sample after creation or [`CursorTracker::reset`] produces a
/// zero delta so the camera does not jump when the cursor is captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    /// Create a tracker with no previous sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position and return `(dx, dy)` in window pixels, y down
    #[allow(clippy::cast_possible_truncation)]
    pub fn delta(&mut self, position: (f64, f64)) -> (f32, f32) {
        let delta = self.last.map_or((0.0, 0.0), |(x, y)| {
            ((position.0 - x) as f32, (position.1 - y) as f32)
        });
        self.last = Some(position);
        delta
    }

    /// Drop the previous sample
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_held_key_fires_once() {
        let mut trigger = EdgeTrigger::new();
        let fired: Vec<bool> = [true, true, true].iter().map(|&h| trigger.update(h)).collect();
        assert_eq!(fired, vec![true, false, false]);
    }

    #[test]
    fn test_release_rearms() {
        let mut trigger = EdgeTrigger::new();
        assert!(trigger.update(true));
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
    }

    #[test]
    fn test_reset_rearms_while_held() {
        let mut trigger = EdgeTrigger::new();
        trigger.update(true);
        trigger.reset();
        assert!(trigger.update(true));
    }

    #[test]
    fn test_cursor_first_sample_is_zero() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.delta((640.0, 360.0)), (0.0, 0.0));
        let (dx, dy) = tracker.delta((650.0, 355.0));
        assert_relative_eq!(dx, 10.0);
        assert_relative_eq!(dy, -5.0);
    }
}
