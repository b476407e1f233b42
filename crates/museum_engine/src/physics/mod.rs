//! Physics module for collision detection
//!
//! Collision in the museum is reject-and-revert: rooms describe their walls
//! and furniture as [`Obstacle`]s and the scene asks whether a candidate
//! camera position falls inside any of them.

pub mod predicates;
pub mod obstacle;
pub mod collision_model;

pub use collision_model::{CollisionModel, ObstacleEntry};
pub use obstacle::Obstacle;
pub use predicates::{
    blocked_by_half_plane_with_gap, within_circle, within_rotated_rectangle, Axis, Direction,
    HalfPlaneWithGap, Span,
};
