//! Deterministic platform replaying a fixed list of frames
//!
//! Used by tests and by the headless tour in the binary.

use super::{KeyCode, MouseButton, MouseButtons, Platform};

/// Input state for one scripted frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedFrame {
    /// Keys held during the frame
    pub keys: Vec<KeyCode>,
    /// Cursor position during the frame
    pub cursor: (f64, f64),
    /// Mouse buttons held during the frame
    pub buttons: MouseButtons,
    /// Scroll delta delivered during the frame
    pub scroll: f64,
}

impl ScriptedFrame {
    /// An idle frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the given keys
    pub fn holding(mut self, keys: &[KeyCode]) -> Self {
        self.keys.extend_from_slice(keys);
        self
    }

    /// Place the cursor
    pub fn with_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor = (x, y);
        self
    }

    /// Hold the given mouse buttons
    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Deliver a scroll delta
    pub fn with_scroll(mut self, scroll: f64) -> Self {
        self.scroll = scroll;
        self
    }
}

/// Platform that plays back scripted frames at a fixed rate
#[derive(Debug, Clone)]
pub struct ScriptedPlatform {
    frames: Vec<ScriptedFrame>,
    current: Option<usize>,
    frame_time: f64,
    scroll_pending: f64,
    close_requested: bool,
}

impl ScriptedPlatform {
    /// Create a platform running at 60 frames per second
    pub fn new(frames: Vec<ScriptedFrame>) -> Self {
        Self {
            frames,
            current: None,
            frame_time: 1.0 / 60.0,
            scroll_pending: 0.0,
            close_requested: false,
        }
    }

    /// Override the simulated frame duration in seconds
    pub fn with_frame_time(mut self, frame_time: f64) -> Self {
        self.frame_time = frame_time;
        self
    }

    /// Append `count` copies of a frame
    pub fn repeat(mut self, frame: &ScriptedFrame, count: usize) -> Self {
        self.frames.extend(std::iter::repeat(frame.clone()).take(count));
        self
    }

    /// Number of scripted frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the script has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn frame(&self) -> Option<&ScriptedFrame> {
        self.current.and_then(|index| self.frames.get(index))
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) {
        let next = self.current.map_or(0, |index| index + 1);
        self.current = Some(next);
        self.scroll_pending += self.frame().map_or(0.0, |frame| frame.scroll);
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.frame().is_some_and(|frame| frame.keys.contains(&key))
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.frame().map_or((0.0, 0.0), |frame| frame.cursor)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.frame().is_some_and(|frame| frame.buttons.contains(button.into()))
    }

    #[allow(clippy::cast_precision_loss)]
    fn elapsed_time(&self) -> f64 {
        self.current.map_or(0.0, |index| index as f64 * self.frame_time)
    }

    fn take_scroll_delta(&mut self) -> f64 {
        std::mem::take(&mut self.scroll_pending)
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.current.is_some_and(|index| index >= self.frames.len())
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }
}
