//! Per-room collision model
//!
//! A flat list of labelled obstacles scanned linearly; the first hit wins.
//! Room obstacle counts stay small enough that no spatial index is kept.

use super::obstacle::Obstacle;
use crate::foundation::math::Vec3;

/// One obstacle in a room's table
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleEntry {
    /// Name used in logs and for toggling
    pub label: &'static str,
    /// The shape
    pub obstacle: Obstacle,
    /// Disabled entries never block (an open door, for instance)
    pub enabled: bool,
}

/// Answers "is this candidate position blocked?" for one room
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionModel {
    entries: Vec<ObstacleEntry>,
}

impl CollisionModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enabled obstacle
    pub fn with(mut self, label: &'static str, obstacle: impl Into<Obstacle>) -> Self {
        self.push(label, obstacle);
        self
    }

    /// Add an enabled obstacle in place
    pub fn push(&mut self, label: &'static str, obstacle: impl Into<Obstacle>) {
        self.entries.push(ObstacleEntry {
            label,
            obstacle: obstacle.into(),
            enabled: true,
        });
    }

    /// Enable or disable every obstacle carrying `label`
    ///
    /// # Returns
    /// Number of entries touched
    pub fn set_enabled(&mut self, label: &str, enabled: bool) -> usize {
        let mut touched = 0;
        for entry in self.entries.iter_mut().filter(|entry| entry.label == label) {
            entry.enabled = enabled;
            touched += 1;
        }
        touched
    }

    /// Whether any enabled obstacle contains `position`
    pub fn is_blocked(&self, position: &Vec3) -> bool {
        self.first_blocking(position).is_some()
    }

    /// Label of the first enabled obstacle containing `position`
    pub fn first_blocking(&self, position: &Vec3) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.enabled && entry.obstacle.blocks(position))
            .map(|entry| entry.label)
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[ObstacleEntry] {
        &self.entries
    }

    /// Number of obstacles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the model has no obstacles
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CollisionModel {
        CollisionModel::new()
            .with("fossils", Obstacle::circle(0.0, 0.0, 2.5))
            .with("door", Obstacle::rotated_rectangle(0.0, -23.0, 3.0, 0.3, 0.0))
    }

    #[test]
    fn test_first_match_reports_label() {
        let model = model();
        assert_eq!(model.first_blocking(&Vec3::new(0.5, 2.0, 0.5)), Some("fossils"));
        assert_eq!(model.first_blocking(&Vec3::new(0.0, 2.0, -23.1)), Some("door"));
        assert_eq!(model.first_blocking(&Vec3::new(10.0, 2.0, 10.0)), None);
    }

    #[test]
    fn test_disabled_entry_never_blocks() {
        let mut model = model();
        assert_eq!(model.set_enabled("door", false), 1);
        assert!(!model.is_blocked(&Vec3::new(0.0, 2.0, -23.1)));
        model.set_enabled("door", true);
        assert!(model.is_blocked(&Vec3::new(0.0, 2.0, -23.1)));
    }

    #[test]
    fn test_unknown_label_touches_nothing() {
        let mut model = model();
        assert_eq!(model.set_enabled("window", false), 0);
        assert_eq!(model.len(), 2);
    }
}
