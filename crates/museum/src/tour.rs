//! Scripted walk used when no window is available

use crate::config::ControlsConfig;
use museum_engine::input::{MouseButtons, ScriptedFrame, ScriptedPlatform};

const FPS: usize = 60;

/// Walk to the effigy, float it, inspect it, then head north into the gallery
pub fn guided_tour(controls: &ControlsConfig) -> ScriptedPlatform {
    let idle = ScriptedFrame::new();
    let forward = ScriptedFrame::new().holding(&[controls.forward]);
    let sprint = ScriptedFrame::new().holding(&[controls.forward, controls.sprint]);
    let left = ScriptedFrame::new().holding(&[controls.left]);
    let interact = ScriptedFrame::new().holding(&[controls.interact]);
    let inspect = ScriptedFrame::new().holding(&[controls.inspect]);
    let flashlight = ScriptedFrame::new().holding(&[controls.flashlight]);
    let drag = |x: f64| ScriptedFrame::new().with_cursor(x, 0.0).with_buttons(MouseButtons::LEFT);

    let mut platform = ScriptedPlatform::new(Vec::new())
        .repeat(&idle, FPS / 2)
        .repeat(&flashlight, 1)
        .repeat(&left, FPS * 5)
        .repeat(&sprint, FPS)
        .repeat(&interact, 1)
        .repeat(&idle, FPS)
        .repeat(&inspect, 1)
        .repeat(&idle, 1);
    for step in 0..FPS {
        #[allow(clippy::cast_precision_loss)]
        let x = step as f64 * 4.0;
        platform = platform.repeat(&drag(x), 1);
    }
    platform
        .repeat(&inspect, 1)
        .repeat(&idle, 1)
        .repeat(&forward, FPS * 4)
        .repeat(&idle, FPS / 2)
}
