//! Obstacle shapes placed in a room's static data

use super::predicates::{self, HalfPlaneWithGap};
use crate::foundation::math::{utils, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A static region that stops the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    /// Round footprint in the horizontal plane
    Circle {
        /// (x, z) center
        center: Vec2,
        /// Radius
        radius: f32,
    },
    /// Rectangular footprint rotated about +Y
    RotatedRectangle {
        /// (x, z) center
        center: Vec2,
        /// Half extent along the local X axis
        half_length: f32,
        /// Half extent along the local Z axis
        half_width: f32,
        /// Rotation about +Y in degrees
        rotation_degrees: f32,
    },
    /// Wall with an optional doorway
    HalfPlane(HalfPlaneWithGap),
    /// Axis-aligned box; the only shape that looks at height
    Box {
        /// Minimum corner
        min: Vec3,
        /// Maximum corner
        max: Vec3,
    },
}

impl Obstacle {
    /// Round footprint centered at (x, z)
    pub fn circle(x: f32, z: f32, radius: f32) -> Self {
        Self::Circle {
            center: Vec2::new(x, z),
            radius,
        }
    }

    /// Rotated rectangular footprint centered at (x, z)
    pub fn rotated_rectangle(x: f32, z: f32, half_length: f32, half_width: f32, rotation_degrees: f32) -> Self {
        Self::RotatedRectangle {
            center: Vec2::new(x, z),
            half_length,
            half_width,
            rotation_degrees,
        }
    }

    /// Box spanning the given corners
    pub fn aabb(min: Vec3, max: Vec3) -> Self {
        Self::Box {
            min: min.inf(&max),
            max: min.sup(&max),
        }
    }

    /// Whether `position` falls inside the obstacle
    pub fn blocks(&self, position: &Vec3) -> bool {
        let point = utils::horizontal(position);
        match self {
            Self::Circle { center, radius } => predicates::within_circle(&point, center, *radius),
            Self::RotatedRectangle {
                center,
                half_length,
                half_width,
                rotation_degrees,
            } => predicates::within_rotated_rectangle(&point, center, *half_length, *half_width, *rotation_degrees),
            Self::HalfPlane(wall) => predicates::blocked_by_half_plane_with_gap(&point, wall),
            Self::Box { min, max } => {
                position.x > min.x
                    && position.x < max.x
                    && position.y > min.y
                    && position.y < max.y
                    && position.z > min.z
                    && position.z < max.z
            }
        }
    }
}

impl From<HalfPlaneWithGap> for Obstacle {
    fn from(wall: HalfPlaneWithGap) -> Self {
        Self::HalfPlane(wall)
    }
}
