//! Application trait and main loop

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::foundation::time::Timer;
use crate::input::Platform;
use crate::render::{RenderError, Renderer};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait for the game and hand it to [`run`].
pub trait Application {
    /// Advance the simulation by one frame
    ///
    /// # Arguments
    /// * `platform` - Input source for this frame
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, platform: &mut dyn Platform, delta_time: f32) -> Result<(), AppError>;

    /// Issue this frame's draws
    fn render(&mut self, renderer: &mut dyn Renderer) -> Result<(), AppError>;

    /// Called once after the loop exits
    fn cleanup(&mut self) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Window or input failure
    #[error("Platform error: {0}")]
    Platform(String),

    /// Rendering failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Drive `app` until the platform asks to close
///
/// Each iteration polls events, measures the frame time from the platform
/// clock, then calls `update` followed by `render`. Returns the number of
/// frames run.
pub fn run<A, P, R>(app: &mut A, platform: &mut P, renderer: &mut R) -> Result<u64, AppError>
where
    A: Application + ?Sized,
    P: Platform,
    R: Renderer,
{
    let mut timer = Timer::new();
    log::info!("Entering main loop");

    while !platform.should_close() {
        platform.poll_events();
        if platform.should_close() {
            break;
        }

        let delta_time = timer.tick(platform.elapsed_time());
        app.update(platform, delta_time)?;
        app.render(renderer)?;
    }

    app.cleanup();
    log::info!(
        "Main loop finished after {} frames ({:.1} average fps)",
        timer.frame_count(),
        timer.average_fps()
    );
    Ok(timer.frame_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::input::{KeyCode, ScriptedFrame, ScriptedPlatform};
    use crate::render::RecordingRenderer;

    #[derive(Default)]
    struct Counter {
        updates: u32,
        renders: u32,
        total_time: f32,
        saw_space: bool,
        cleaned_up: bool,
    }

    impl Application for Counter {
        fn update(&mut self, platform: &mut dyn Platform, delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            self.total_time += delta_time;
            self.saw_space |= platform.is_key_down(KeyCode::Space);
            Ok(())
        }

        fn render(&mut self, renderer: &mut dyn Renderer) -> Result<(), AppError> {
            self.renders += 1;
            renderer.begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())?;
            renderer.end_frame()?;
            Ok(())
        }

        fn cleanup(&mut self) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_runs_every_scripted_frame() {
        let frames = vec![
            ScriptedFrame::default(),
            ScriptedFrame::default().holding(&[KeyCode::Space]),
            ScriptedFrame::default(),
        ];
        let mut platform = ScriptedPlatform::new(frames);
        let mut renderer = RecordingRenderer::new();
        let mut app = Counter::default();

        let count = run(&mut app, &mut platform, &mut renderer).unwrap();

        assert_eq!(count, 3);
        assert_eq!(app.updates, 3);
        assert_eq!(app.renders, 3);
        assert_eq!(renderer.frames(), 3);
        assert!(app.saw_space);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_errors_stop_the_loop() {
        struct Failing;
        impl Application for Failing {
            fn update(&mut self, _platform: &mut dyn Platform, _delta_time: f32) -> Result<(), AppError> {
                Err(AppError::Custom("broken exhibit".to_string()))
            }
            fn render(&mut self, _renderer: &mut dyn Renderer) -> Result<(), AppError> {
                Ok(())
            }
        }

        let mut platform = ScriptedPlatform::new(vec![ScriptedFrame::default(); 4]);
        let mut renderer = RecordingRenderer::new();
        let result = run(&mut Failing, &mut platform, &mut renderer);
        assert!(matches!(result, Err(AppError::Custom(_))));
    }
}
