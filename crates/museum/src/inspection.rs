//! Inspection mode
//!
//! While inspecting, the camera is parked in front of one exhibit and the
//! mouse turns the exhibit instead of the view. Entering saves the free
//! camera pose; leaving puts it back.

use museum_engine::foundation::math::{Axis3, Mat4, Mat4Ext, Vec3};
use museum_engine::input::CursorTracker;
use museum_engine::render::Camera;

/// Exhibit that can be inspected, with its close-up viewpoint
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionTarget {
    /// Exhibit identity
    pub id: &'static str,
    /// Point the camera looks at
    pub focus: Vec3,
    /// Camera position relative to `focus`
    pub offset: Vec3,
    /// Shown in the log on entry
    pub description: &'static str,
}

impl InspectionTarget {
    /// Camera position while inspecting
    pub fn viewpoint(&self) -> Vec3 {
        self.focus + self.offset
    }
}

/// Controller mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectionMode {
    /// Free camera
    #[default]
    Free,
    /// Camera parked at the named exhibit
    Inspecting(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedPose {
    position: Vec3,
    yaw: f32,
    pitch: f32,
}

/// Free/inspecting state machine plus the drag rotation
#[derive(Debug, Clone)]
pub struct InspectionController {
    mode: InspectionMode,
    saved: Option<SavedPose>,
    rotation_y: f32,
    rotation_x: f32,
    sensitivity: f32,
    cursor: CursorTracker,
}

impl InspectionController {
    /// Controller in free mode; `sensitivity` is degrees per pixel of drag
    pub fn new(sensitivity: f32) -> Self {
        Self {
            mode: InspectionMode::Free,
            saved: None,
            rotation_y: 0.0,
            rotation_x: 0.0,
            sensitivity,
            cursor: CursorTracker::new(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> InspectionMode {
        self.mode
    }

    /// Whether an exhibit is being inspected
    pub fn is_inspecting(&self) -> bool {
        matches!(self.mode, InspectionMode::Inspecting(_))
    }

    /// Exhibit being inspected
    pub fn target(&self) -> Option<&'static str> {
        match self.mode {
            InspectionMode::Inspecting(id) => Some(id),
            InspectionMode::Free => None,
        }
    }

    /// Accumulated (y, x) rotation in degrees
    pub fn rotation(&self) -> (f32, f32) {
        (self.rotation_y, self.rotation_x)
    }

    /// Park the camera at `target`
    ///
    /// Does nothing and returns `false` when already inspecting.
    pub fn enter(&mut self, target: &InspectionTarget, camera: &mut Camera) -> bool {
        if self.is_inspecting() {
            return false;
        }

        self.saved = Some(SavedPose {
            position: camera.position,
            yaw: camera.yaw,
            pitch: camera.pitch,
        });
        self.rotation_y = 0.0;
        self.rotation_x = 0.0;
        self.cursor.reset();

        camera.position = target.viewpoint();
        camera.look_at_point(&target.focus);
        self.mode = InspectionMode::Inspecting(target.id);

        log::info!("Inspecting {}: {}", target.id, target.description);
        true
    }

    /// Restore the saved camera pose
    ///
    /// Does nothing and returns `false` in free mode.
    pub fn exit(&mut self, camera: &mut Camera) -> bool {
        let InspectionMode::Inspecting(id) = self.mode else {
            return false;
        };

        if let Some(saved) = self.saved.take() {
            camera.position = saved.position;
            camera.yaw = saved.yaw;
            camera.pitch = saved.pitch;
            camera.update_vectors();
        }
        self.mode = InspectionMode::Free;
        self.cursor.reset();

        log::info!("Stopped inspecting {}", id);
        true
    }

    /// Feed this frame's cursor position and drag button state
    ///
    /// Rotation is not clamped and wraps freely.
    pub fn drag(&mut self, cursor: (f64, f64), button_held: bool) {
        if !self.is_inspecting() || !button_held {
            self.cursor.reset();
            return;
        }
        let (dx, dy) = self.cursor.delta(cursor);
        self.rotation_y += dx * self.sensitivity;
        self.rotation_x += dy * self.sensitivity;
    }

    /// Y-then-X rotation for the inspected exhibit
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_about(Axis3::Y, self.rotation_y) * Mat4::rotation_about(Axis3::X, self.rotation_x)
    }
}

impl Default for InspectionController {
    fn default() -> Self {
        Self::new(0.5)
    }
}
