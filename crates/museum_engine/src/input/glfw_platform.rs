//! GLFW-backed platform
//!
//! Opens a window without a client API (the graphics backend is attached
//! separately), captures the cursor for mouse look and answers the
//! [`Platform`] queries from GLFW's polled state.

use super::{KeyCode, MouseButton, Platform};
use thiserror::Error;

/// Window creation errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window could not be created
    #[error("Window creation failed")]
    CreationFailed,
}

/// Window and input provider backed by GLFW
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    scroll: f64,
}

impl GlfwPlatform {
    /// Create the window and capture the cursor
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, PlatformError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| PlatformError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(PlatformError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_scroll_polling(true);
        window.set_cursor_mode(glfw::CursorMode::Disabled);

        log::info!("Created {width}x{height} window \"{title}\"");

        Ok(Self {
            glfw,
            window,
            events,
            scroll: 0.0,
        })
    }

    fn key(key: KeyCode) -> glfw::Key {
        use glfw::Key;
        match key {
            KeyCode::A => Key::A,
            KeyCode::B => Key::B,
            KeyCode::C => Key::C,
            KeyCode::D => Key::D,
            KeyCode::E => Key::E,
            KeyCode::F => Key::F,
            KeyCode::G => Key::G,
            KeyCode::H => Key::H,
            KeyCode::I => Key::I,
            KeyCode::J => Key::J,
            KeyCode::K => Key::K,
            KeyCode::L => Key::L,
            KeyCode::M => Key::M,
            KeyCode::N => Key::N,
            KeyCode::O => Key::O,
            KeyCode::P => Key::P,
            KeyCode::Q => Key::Q,
            KeyCode::R => Key::R,
            KeyCode::S => Key::S,
            KeyCode::T => Key::T,
            KeyCode::U => Key::U,
            KeyCode::V => Key::V,
            KeyCode::W => Key::W,
            KeyCode::X => Key::X,
            KeyCode::Y => Key::Y,
            KeyCode::Z => Key::Z,
            KeyCode::Space => Key::Space,
            KeyCode::Enter => Key::Enter,
            KeyCode::Escape => Key::Escape,
            KeyCode::LeftShift => Key::LeftShift,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
        }
    }

    fn button(button: MouseButton) -> glfw::MouseButton {
        match button {
            MouseButton::Left => glfw::MouseButtonLeft,
            MouseButton::Right => glfw::MouseButtonRight,
            MouseButton::Middle => glfw::MouseButtonMiddle,
        }
    }
}

impl Platform for GlfwPlatform {
    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::Scroll(_, y) => self.scroll += y,
                glfw::WindowEvent::Close => self.window.set_should_close(true),
                _ => {}
            }
        }
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.window.get_key(Self::key(key)) != glfw::Action::Release
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.window.get_mouse_button(Self::button(button)) != glfw::Action::Release
    }

    fn elapsed_time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn take_scroll_delta(&mut self) -> f64 {
        std::mem::take(&mut self.scroll)
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn request_close(&mut self) {
        self.window.set_should_close(true);
    }
}
