//! Input management system
//!
//! The scene never talks to a window directly. A [`Platform`] answers
//! per-frame queries, and an [`InputSnapshot`] freezes those answers for one
//! frame so every consumer in that frame sees the same state.

pub mod edge;
pub mod scripted;
#[cfg(feature = "windowed")]
pub mod glfw_platform;

pub use edge::{CursorTracker, EdgeTrigger};
pub use scripted::{ScriptedFrame, ScriptedPlatform};
#[cfg(feature = "windowed")]
pub use glfw_platform::{GlfwPlatform, PlatformError};

use serde::{Deserialize, Serialize};

/// Window and input provider consumed by the application loop
pub trait Platform {
    /// Pump pending window events
    fn poll_events(&mut self);

    /// Whether the key is currently held
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Cursor position in window pixels
    fn cursor_position(&self) -> (f64, f64);

    /// Whether the mouse button is currently held
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;

    /// Seconds since the platform started
    fn elapsed_time(&self) -> f64;

    /// Vertical scroll accumulated since the previous call
    fn take_scroll_delta(&mut self) -> f64 {
        0.0
    }

    /// Whether the window asked to close
    fn should_close(&self) -> bool;

    /// Ask the platform to close at the end of the frame
    fn request_close(&mut self);
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Left shift
    LeftShift,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags::bitflags! {
    /// Set of held mouse buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        /// Left mouse button
        const LEFT = 1 << 0;
        /// Right mouse button
        const RIGHT = 1 << 1;
        /// Middle mouse button
        const MIDDLE = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
        }
    }
}

/// One frame of sampled input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys: Vec<KeyCode>,
    /// Cursor position in window pixels
    pub cursor: (f64, f64),
    /// Held mouse buttons
    pub buttons: MouseButtons,
    /// Vertical scroll since the previous frame
    pub scroll: f64,
}

impl InputSnapshot {
    /// Sample the platform for the given set of keys
    pub fn capture<P: Platform + ?Sized>(platform: &mut P, watched: &[KeyCode]) -> Self {
        let keys = watched
            .iter()
            .copied()
            .filter(|&key| platform.is_key_down(key))
            .collect();
        let buttons = [MouseButton::Left, MouseButton::Right, MouseButton::Middle]
            .into_iter()
            .filter(|&button| platform.is_mouse_button_down(button))
            .fold(MouseButtons::empty(), |acc, button| acc | button.into());

        Self {
            keys,
            cursor: platform.cursor_position(),
            buttons,
            scroll: platform.take_scroll_delta(),
        }
    }

    /// Build a snapshot directly from held keys
    pub fn with_keys(keys: &[KeyCode]) -> Self {
        Self {
            keys: keys.to_vec(),
            ..Self::default()
        }
    }

    /// Set the cursor position
    pub fn with_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor = (x, y);
        self
    }

    /// Set the held mouse buttons
    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Whether the key was held when the snapshot was taken
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether the button was held when the snapshot was taken
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_only_reports_watched_keys() {
        let mut platform = ScriptedPlatform::new(vec![ScriptedFrame::new()
            .holding(&[KeyCode::W, KeyCode::E])
            .with_buttons(MouseButtons::LEFT)
            .with_cursor(10.0, 20.0)]);
        platform.poll_events();

        let snapshot = InputSnapshot::capture(&mut platform, &[KeyCode::W, KeyCode::S]);
        assert!(snapshot.is_key_down(KeyCode::W));
        assert!(!snapshot.is_key_down(KeyCode::E));
        assert!(snapshot.is_mouse_button_down(MouseButton::Left));
        assert!(!snapshot.is_mouse_button_down(MouseButton::Right));
        assert_eq!(snapshot.cursor, (10.0, 20.0));
    }

    #[test]
    fn test_button_set_conversion() {
        let set = MouseButtons::from(MouseButton::Middle) | MouseButton::Left.into();
        assert!(set.contains(MouseButtons::LEFT));
        assert!(set.contains(MouseButtons::MIDDLE));
        assert!(!set.contains(MouseButtons::RIGHT));
    }
}
