//! Floating animation for exhibits
//!
//! While animating, the vertical offset follows a sine wave. When switched
//! off the offset decays by a constant factor per frame and snaps to rest
//! once it is small.

/// Per-frame decay factor once animation stops
pub const DECAY_FACTOR: f32 = 0.9;

/// Offset magnitude below which the exhibit snaps to rest
pub const REST_THRESHOLD: f32 = 0.01;

/// Float animation state for one exhibit
#[derive(Debug, Clone, PartialEq)]
pub struct ExhibitAnimator {
    amplitude: f32,
    angular_speed: f32,
    animating: bool,
    elapsed_time: f32,
    current_offset: f32,
}

impl ExhibitAnimator {
    /// Animator at rest
    pub fn new(amplitude: f32, angular_speed: f32) -> Self {
        Self {
            amplitude,
            angular_speed,
            animating: false,
            elapsed_time: 0.0,
            current_offset: 0.0,
        }
    }

    /// Start or stop floating
    pub fn toggle(&mut self) {
        self.animating = !self.animating;
    }

    /// Whether the exhibit is floating
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Seconds spent floating since the last rest
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Vertical displacement to add to the exhibit transform
    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    /// Advance by `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        if self.animating {
            self.elapsed_time += delta_time;
            self.current_offset = self.amplitude * (self.elapsed_time * self.angular_speed).sin();
        } else if self.current_offset != 0.0 {
            self.current_offset *= DECAY_FACTOR;
            if self.current_offset.abs() < REST_THRESHOLD {
                self.current_offset = 0.0;
                self.elapsed_time = 0.0;
            }
        }
    }
}
