//! # First-person camera
//!
//! Yaw/pitch camera used for free roaming and overridden while an exhibit is
//! inspected. Angles are kept in degrees; the derived basis vectors are
//! recomputed whenever the angles change.
//!
//! Conventions: right-handed, Y up. Yaw -90 looks down -Z.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use serde::{Deserialize, Serialize};

/// Pitch limit when mouse look is constrained, in degrees
pub const PITCH_LIMIT: f32 = 89.0;

/// Smallest field of view reachable by zooming, in degrees
pub const MIN_ZOOM: f32 = 1.0;

/// Widest field of view, in degrees
pub const MAX_ZOOM: f32 = 45.0;

/// Movement directions understood by [`Camera::process_keyboard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// Tunables for the free camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Spawn position
    pub spawn: [f32; 3],
    /// Initial yaw in degrees
    pub yaw: f32,
    /// Initial pitch in degrees
    pub pitch: f32,
    /// Units per second
    pub movement_speed: f32,
    /// Degrees per pixel of mouse travel
    pub mouse_sensitivity: f32,
    /// Initial field of view in degrees
    pub zoom: f32,
    /// Speed factor while sprinting
    pub sprint_multiplier: f32,
    /// Height walking pins the camera to
    pub eye_height: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            spawn: [0.0, 2.0, 5.0],
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            sprint_multiplier: 2.5,
            eye_height: 2.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// First-person camera with yaw/pitch orientation
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    /// Units per second
    pub movement_speed: f32,
    /// Degrees per pixel of mouse travel
    pub mouse_sensitivity: f32,
    zoom: f32,
    /// Speed factor while sprinting
    pub sprint_multiplier: f32,
    /// Height walking pins the camera to
    pub eye_height: f32,
}

impl Camera {
    /// Create a camera at `position` with the given yaw and pitch
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::y(),
            right: Vec3::x(),
            world_up: Vec3::y(),
            yaw,
            pitch: utils::clamp(pitch, -PITCH_LIMIT, PITCH_LIMIT),
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: MAX_ZOOM,
            sprint_multiplier: 2.5,
            eye_height: position.y,
        };
        camera.update_vectors();
        camera
    }

    /// Create a camera from settings
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let [x, y, z] = settings.spawn;
        let mut camera = Self::new(Vec3::new(x, y, z), settings.yaw, settings.pitch);
        camera.movement_speed = settings.movement_speed;
        camera.mouse_sensitivity = settings.mouse_sensitivity;
        camera.zoom = utils::clamp(settings.zoom, MIN_ZOOM, MAX_ZOOM);
        camera.sprint_multiplier = settings.sprint_multiplier;
        camera.eye_height = settings.eye_height;
        camera
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Move along the ground plane
    ///
    /// Height is pinned to `eye_height` afterwards so looking up or down
    /// never lifts the walker off the floor.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32, sprint: bool) {
        let multiplier = if sprint { self.sprint_multiplier } else { 1.0 };
        let velocity = self.movement_speed * multiplier * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
        self.position.y = self.eye_height;
    }

    /// Turn by a mouse offset in pixels (y up is positive)
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = utils::clamp(self.pitch, -PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Zoom by a scroll offset; the field of view stays within [1, 45] degrees
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = utils::clamp(self.zoom - y_offset, MIN_ZOOM, MAX_ZOOM);
    }

    /// Set orientation directly and recompute the basis
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = utils::clamp(pitch, -PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Turn so the view direction points at `target`
    pub fn look_at_point(&mut self, target: &Vec3) {
        let to_target = target - self.position;
        let distance = to_target.norm();
        if distance <= f32::EPSILON {
            return;
        }
        let yaw = utils::rad_to_deg(to_target.z.atan2(to_target.x));
        let pitch = utils::rad_to_deg((to_target.y / distance).asin());
        self.set_orientation(yaw, pitch);
    }

    /// Recompute front/right/up from yaw and pitch
    pub fn update_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
        log::trace!("Camera yaw {:.1} pitch {:.1} front {:?}", self.yaw, self.pitch, self.front);
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection using the current zoom as vertical field of view
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective(utils::deg_to_rad(self.zoom), aspect, near, far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.front().x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(camera.front().z, -1.0, epsilon = EPSILON);
        assert_relative_eq!(camera.right().x, 1.0, epsilon = EPSILON);
        assert_relative_eq!(camera.up().y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 5000.0, true);
        assert_relative_eq!(camera.pitch, PITCH_LIMIT);
        camera.process_mouse_movement(0.0, -10000.0, true);
        assert_relative_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_unconstrained_pitch_is_free() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 1000.0, false);
        assert_relative_eq!(camera.pitch, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_scroll(100.0);
        assert_relative_eq!(camera.zoom(), MIN_ZOOM);
        camera.process_mouse_scroll(-100.0);
        assert_relative_eq!(camera.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_walking_keeps_eye_height() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 300.0, true);
        camera.process_keyboard(CameraMovement::Forward, 1.0, false);
        assert_relative_eq!(camera.position.y, 2.0);
        assert!(camera.position.z < 5.0);
    }

    #[test]
    fn test_sprint_multiplies_speed() {
        let mut walker = Camera::default();
        let mut runner = Camera::default();
        walker.process_keyboard(CameraMovement::Right, 1.0, false);
        runner.process_keyboard(CameraMovement::Right, 1.0, true);
        assert_relative_eq!(walker.position.x, 2.5, epsilon = EPSILON);
        assert_relative_eq!(runner.position.x, 6.25, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_point() {
        let mut camera = Camera::new(Vec3::new(0.0, 2.0, 0.0), 0.0, 0.0);
        camera.look_at_point(&Vec3::new(3.0, 2.0, 0.0));
        assert_relative_eq!(camera.yaw, 0.0, epsilon = EPSILON);
        camera.look_at_point(&Vec3::new(0.0, 5.0, 3.0));
        assert_relative_eq!(camera.yaw, 90.0, epsilon = 1e-3);
        assert_relative_eq!(camera.pitch, 45.0, epsilon = 1e-3);
    }
}
