//! Proximity plus edge-triggered key state for one interactable

use museum_engine::foundation::math::{utils, Vec2, Vec3};
use museum_engine::physics::within_circle;

/// What happened to a zone during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationEvent {
    /// Nothing changed
    #[default]
    None,
    /// The actor moved into range
    EnteredRange,
    /// The actor moved out of range
    ExitedRange,
    /// The key was pressed in range and `active` flipped
    Toggled,
}

/// Circle around an interactable plus the key edge state
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionZone {
    label: &'static str,
    center: Vec2,
    radius: f32,
    previous_pressed: bool,
    in_range: bool,
    active: bool,
}

impl InteractionZone {
    /// Zone centered at (x, z)
    pub fn new(label: &'static str, x: f32, z: f32, radius: f32) -> Self {
        Self {
            label,
            center: Vec2::new(x, z),
            radius,
            previous_pressed: false,
            in_range: false,
            active: false,
        }
    }

    /// Name used in logs
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// (x, z) center
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Activation radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Toggle state
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Force the toggle state
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the last update saw the actor in range
    pub fn is_in_range(&self) -> bool {
        self.in_range
    }

    /// Whether `actor` is inside the activation circle right now
    pub fn contains(&self, actor: &Vec3) -> bool {
        within_circle(&utils::horizontal(actor), &self.center, self.radius)
    }

    /// Horizontal distance from `actor` to the center
    pub fn distance_to(&self, actor: &Vec3) -> f32 {
        (utils::horizontal(actor) - self.center).norm()
    }

    /// Update from the actor position and the raw key state
    pub fn update(&mut self, actor: &Vec3, pressed: bool) -> ActivationEvent {
        let in_range = self.contains(actor);
        self.update_with_range(in_range, pressed)
    }

    /// Update with the range decided by the caller
    ///
    /// Out of range the remembered key state is cleared, so the key has to
    /// be pressed again after re-entering before the zone toggles.
    pub fn update_with_range(&mut self, in_range: bool, pressed: bool) -> ActivationEvent {
        let was_in_range = self.in_range;
        self.in_range = in_range;

        if !in_range {
            self.previous_pressed = false;
            return if was_in_range {
                ActivationEvent::ExitedRange
            } else {
                ActivationEvent::None
            };
        }

        let rising = pressed && !self.previous_pressed;
        self.previous_pressed = pressed;

        if rising {
            self.active = !self.active;
            ActivationEvent::Toggled
        } else if !was_in_range {
            ActivationEvent::EnteredRange
        } else {
            ActivationEvent::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effigy() -> InteractionZone {
        InteractionZone::new("effigy", -17.5, -7.0, 3.0)
    }

    #[test]
    fn test_held_key_toggles_once() {
        let mut zone = effigy();
        let toggles = (0..10)
            .map(|_| zone.update_with_range(true, true))
            .filter(|event| *event == ActivationEvent::Toggled)
            .count();
        assert_eq!(toggles, 1);
        assert!(zone.is_active());
    }

    #[test]
    fn test_release_and_press_again_toggles_twice() {
        let mut zone = effigy();
        assert_eq!(zone.update_with_range(true, true), ActivationEvent::Toggled);
        assert_eq!(zone.update_with_range(true, false), ActivationEvent::None);
        assert_eq!(zone.update_with_range(true, true), ActivationEvent::Toggled);
        assert!(!zone.is_active());
    }

    #[test]
    fn test_range_events() {
        let mut zone = effigy();
        let far = Vec3::new(0.0, 2.0, 5.0);
        let near = Vec3::new(-16.0, 2.0, -6.0);

        assert_eq!(zone.update(&far, false), ActivationEvent::None);
        assert_eq!(zone.update(&near, false), ActivationEvent::EnteredRange);
        assert_eq!(zone.update(&near, false), ActivationEvent::None);
        assert_eq!(zone.update(&far, false), ActivationEvent::ExitedRange);
        assert!(!zone.is_in_range());
    }

    #[test]
    fn test_press_out_of_range_does_nothing() {
        let mut zone = effigy();
        assert_eq!(zone.update(&Vec3::new(0.0, 2.0, 5.0), true), ActivationEvent::None);
        assert!(!zone.is_active());
    }

    #[test]
    fn test_toggle_wins_over_entering() {
        let mut zone = effigy();
        let near = Vec3::new(-17.0, 2.0, -7.0);
        assert_eq!(zone.update(&near, true), ActivationEvent::Toggled);
        assert!(zone.is_in_range());
    }

    #[test]
    fn test_leaving_range_clears_key_state() {
        let mut zone = effigy();
        zone.update_with_range(true, true);
        zone.update_with_range(false, true);
        assert_eq!(zone.update_with_range(true, true), ActivationEvent::Toggled);
    }
}
