//! Exclusive key routing between overlapping zones

use super::zone::{ActivationEvent, InteractionZone};
use museum_engine::foundation::math::Vec3;

/// Non-trivial event of one zone in a set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEvent {
    /// Index of the zone in declaration order
    pub index: usize,
    /// What happened
    pub event: ActivationEvent,
}

/// Zones sharing one key, in declaration order
///
/// Each update picks the closest in-range zone (earlier declaration wins a
/// tie) and feeds it the key. Every other zone is updated as out of range so
/// its edge state resets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSet {
    zones: Vec<InteractionZone>,
    target: Option<usize>,
}

impl ZoneSet {
    /// Build from zones in priority order
    pub fn new(zones: Vec<InteractionZone>) -> Self {
        Self { zones, target: None }
    }

    /// Closest zone containing `actor`
    pub fn closest_in_range(&self, actor: &Vec3) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, zone) in self.zones.iter().enumerate() {
            if !zone.contains(actor) {
                continue;
            }
            let distance = zone.distance_to(actor);
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Route one frame of key state; returns every event other than `None`
    pub fn update(&mut self, actor: &Vec3, pressed: bool) -> Vec<ZoneEvent> {
        self.target = self.closest_in_range(actor);
        let target = self.target;

        self.zones
            .iter_mut()
            .enumerate()
            .filter_map(|(index, zone)| {
                let event = zone.update_with_range(target == Some(index), pressed);
                (event != ActivationEvent::None).then_some(ZoneEvent { index, event })
            })
            .collect()
    }

    /// Zone that received the key in the last update
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Zone by index
    pub fn get(&self, index: usize) -> Option<&InteractionZone> {
        self.zones.get(index)
    }

    /// Mutable zone by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut InteractionZone> {
        self.zones.get_mut(index)
    }

    /// Whether zone `index` is active
    pub fn is_active(&self, index: usize) -> bool {
        self.zones.get(index).is_some_and(InteractionZone::is_active)
    }

    /// All zones
    pub fn iter(&self) -> impl Iterator<Item = &InteractionZone> {
        self.zones.iter()
    }

    /// Number of zones
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> ZoneSet {
        ZoneSet::new(vec![
            InteractionZone::new("left", -1.0, 0.0, 3.0),
            InteractionZone::new("right", 1.0, 0.0, 3.0),
        ])
    }

    #[test]
    fn test_closest_zone_wins() {
        let mut zones = pair();
        let events = zones.update(&Vec3::new(0.8, 2.0, 0.0), true);
        assert_eq!(
            events,
            vec![ZoneEvent {
                index: 1,
                event: ActivationEvent::Toggled
            }]
        );
        assert!(!zones.is_active(0));
        assert!(zones.is_active(1));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let mut zones = pair();
        zones.update(&Vec3::new(0.0, 2.0, 0.0), true);
        assert_eq!(zones.target(), Some(0));
        assert!(zones.is_active(0));
        assert!(!zones.is_active(1));
    }

    #[test]
    fn test_losing_zone_resets_edge_state() {
        let mut zones = pair();
        zones.update(&Vec3::new(-0.5, 2.0, 0.0), true);
        assert!(zones.is_active(0));

        // Walk over to the right zone with the key still held
        let events = zones.update(&Vec3::new(0.5, 2.0, 0.0), true);
        assert!(events.contains(&ZoneEvent {
            index: 1,
            event: ActivationEvent::Toggled
        }));
        assert!(events.contains(&ZoneEvent {
            index: 0,
            event: ActivationEvent::ExitedRange
        }));
    }

    #[test]
    fn test_nothing_in_range() {
        let mut zones = pair();
        assert!(zones.update(&Vec3::new(20.0, 2.0, 20.0), true).is_empty());
        assert_eq!(zones.target(), None);
    }
}
