//! Static placement of models in the world
//!
//! A placement is translate, then each rotation in order, then scale, all
//! post-multiplied, so the last rotation listed is applied to the model
//! first.

use museum_engine::foundation::math::{Axis3, Mat4, Mat4Ext, Vec3};

/// Where and how a model sits in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// World translation
    pub translation: Vec3,
    /// Rotations in degrees, applied in listed order
    pub rotations: Vec<(Axis3, f32)>,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Placement {
    /// Unrotated, unit-scale placement at (x, y, z)
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            rotations: Vec::new(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Append a rotation
    #[must_use]
    pub fn rotate(mut self, axis: Axis3, degrees: f32) -> Self {
        self.rotations.push((axis, degrees));
        self
    }

    /// Uniform scale
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        self.scaled_xyz(factor, factor, factor)
    }

    /// Per-axis scale
    #[must_use]
    pub fn scaled_xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    /// Model matrix
    pub fn matrix(&self) -> Mat4 {
        self.matrix_with(0.0, &Mat4::identity())
    }

    /// Model matrix lifted by `y_offset`
    pub fn raised(&self, y_offset: f32) -> Mat4 {
        self.matrix_with(y_offset, &Mat4::identity())
    }

    /// Model matrix lifted by `y_offset` with `pivot` applied right after
    /// the translation
    pub fn matrix_with(&self, y_offset: f32, pivot: &Mat4) -> Mat4 {
        let translation = self.translation + Vec3::new(0.0, y_offset, 0.0);
        let mut model = Mat4::new_translation(&translation) * pivot;
        for &(axis, degrees) in &self.rotations {
            model *= Mat4::rotation_about(axis, degrees);
        }
        model * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use museum_engine::foundation::math::Point3;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_translation_and_scale() {
        let placement = Placement::at(0.0, 24.0, 10.0).scaled(10.0);
        let p = placement.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 24.0, epsilon = EPSILON);
        assert_relative_eq!(p.z, 10.0, epsilon = EPSILON);
    }

    #[test]
    fn test_last_rotation_applies_first() {
        // +X turned about Z by 90 lands on +Y, then about X by 90 lands on +Z
        let placement = Placement::at(0.0, 0.0, 0.0)
            .rotate(Axis3::X, 90.0)
            .rotate(Axis3::Z, 90.0);
        let v = placement.matrix().transform_vector(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(v.z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_raised_only_moves_up() {
        let placement = Placement::at(-17.5, 2.5, -7.0).rotate(Axis3::Y, 120.0);
        let lifted = placement.raised(0.3);
        let base = placement.matrix();
        assert_relative_eq!(lifted[(1, 3)] - base[(1, 3)], 0.3, epsilon = EPSILON);
        assert_relative_eq!(lifted[(0, 3)], base[(0, 3)], epsilon = EPSILON);
    }
}
