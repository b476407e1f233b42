//! Spatial predicates over the horizontal plane
//!
//! Pure functions shared by every room's collision and proximity checks.
//! Points are (x, z) pairs; height never enters these tests.

use crate::foundation::math::{utils, Vec2};
use serde::{Deserialize, Serialize};

/// Horizontal axis a wall is perpendicular to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// World X
    X,
    /// World Z
    Z,
}

impl Axis {
    /// Coordinate of `point` along this axis
    pub fn of(self, point: &Vec2) -> f32 {
        match self {
            Self::X => point.x,
            Self::Z => point.y,
        }
    }

    /// The other horizontal axis
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Z,
            Self::Z => Self::X,
        }
    }
}

/// Side of a boundary that counts as "past" it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Coordinates at or above the boundary
    Positive,
    /// Coordinates at or below the boundary
    Negative,
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl Span {
    /// Create a span; the bounds are reordered if given backwards
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether `value` lies within the span, bounds included
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A wall expressed as an axis-aligned half-plane with an optional doorway
///
/// The wall is solid past `boundary` in `direction`. `band` limits how far
/// past the boundary the wall reaches along the tested axis, `extent` limits
/// which stretch of the other axis it covers, and `gap` is the doorway on the
/// other axis. Each band is literal per-wall data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfPlaneWithGap {
    /// Axis the boundary is measured on
    pub axis: Axis,
    /// Boundary coordinate on `axis`
    pub boundary: f32,
    /// Which side of the boundary is blocked
    pub direction: Direction,
    /// Doorway opening on the other axis
    pub gap: Option<Span>,
    /// Tolerance band on `axis` where the wall is solid
    pub band: Option<Span>,
    /// Stretch of the other axis the wall covers
    pub extent: Option<Span>,
}

impl HalfPlaneWithGap {
    /// Unbounded wall with no doorway
    pub fn new(axis: Axis, boundary: f32, direction: Direction) -> Self {
        Self {
            axis,
            boundary,
            direction,
            gap: None,
            band: None,
            extent: None,
        }
    }

    /// Open a doorway between `min` and `max` on the other axis
    pub fn with_gap(mut self, min: f32, max: f32) -> Self {
        self.gap = Some(Span::new(min, max));
        self
    }

    /// Restrict the wall to a band along the tested axis
    pub fn with_band(mut self, min: f32, max: f32) -> Self {
        self.band = Some(Span::new(min, max));
        self
    }

    /// Restrict the wall to a stretch of the other axis
    pub fn with_extent(mut self, min: f32, max: f32) -> Self {
        self.extent = Some(Span::new(min, max));
        self
    }
}

/// Check if a point lies inside a circle
///
/// # Arguments
/// * `point` - (x, z) of the point
/// * `center` - (x, z) of the circle's center
/// * `radius` - Radius of the circle
///
/// # Returns
/// `true` if the distance is strictly less than the radius
pub fn within_circle(point: &Vec2, center: &Vec2, radius: f32) -> bool {
    (point - center).norm_squared() < radius * radius
}

/// Check if a point lies inside a rectangle rotated about the Y axis
///
/// The offset from the center is carried into the rectangle's local frame by
/// the inverse rotation, then compared against the half extents.
///
/// # Arguments
/// * `point` - (x, z) of the point
/// * `center` - (x, z) of the rectangle's center
/// * `half_length` - Half extent along the local X axis
/// * `half_width` - Half extent along the local Z axis
/// * `rotation_degrees` - Rotation of the rectangle about +Y
pub fn within_rotated_rectangle(
    point: &Vec2,
    center: &Vec2,
    half_length: f32,
    half_width: f32,
    rotation_degrees: f32,
) -> bool {
    let (sin, cos) = utils::deg_to_rad(rotation_degrees).sin_cos();
    let offset = point - center;
    let local_x = offset.x * cos + offset.y * sin;
    let local_z = -offset.x * sin + offset.y * cos;
    local_x.abs() < half_length && local_z.abs() < half_width
}

/// Check if a point is stopped by a wall half-plane
///
/// # Returns
/// `true` when the point is at or past the boundary, inside the wall's band
/// and extent, and not inside the doorway gap
pub fn blocked_by_half_plane_with_gap(point: &Vec2, wall: &HalfPlaneWithGap) -> bool {
    let along = wall.axis.of(point);
    let across = wall.axis.other().of(point);

    let past = match wall.direction {
        Direction::Positive => along >= wall.boundary,
        Direction::Negative => along <= wall.boundary,
    };
    if !past {
        return false;
    }
    if wall.band.is_some_and(|band| !band.contains(along)) {
        return false;
    }
    if wall.extent.is_some_and(|extent| !extent.contains(across)) {
        return false;
    }
    !wall.gap.is_some_and(|gap| gap.contains(across))
}
