//! Frame timing driven by the platform clock

/// Frame timer fed with the platform's elapsed time
///
/// The platform owns the clock; the timer only turns successive readings into
/// per-frame deltas. The very first reading yields a zero delta.
#[derive(Debug, Clone)]
pub struct Timer {
    last_time: Option<f64>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_time: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: 0.25,
        }
    }

    /// Cap the delta returned after a long stall (window drag, breakpoint)
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Advance the timer to `now` (seconds) and return the frame delta
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = self.last_time.map_or(0.0, |last| (now - last).max(0.0) as f32);
        self.delta_time = delta.min(self.max_delta);
        self.total_time += self.delta_time;
        self.last_time = Some(now);
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time since the first tick
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the first tick
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_is_zero() {
        let mut timer = Timer::new();
        assert_relative_eq!(timer.tick(12.5), 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_tick_returns_difference() {
        let mut timer = Timer::new();
        timer.tick(1.0);
        assert_relative_eq!(timer.tick(1.5), 0.5);
        assert_relative_eq!(timer.total_time(), 0.5);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut timer = Timer::new().with_max_delta(0.1);
        timer.tick(0.0);
        assert_relative_eq!(timer.tick(3.0), 0.1);
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let mut timer = Timer::new();
        timer.tick(2.0);
        assert_relative_eq!(timer.tick(1.0), 0.0);
    }
}
