//! The three rooms of the museum
//!
//! Each room owns its obstacle table, its exhibits and the zones for its
//! interactables. Rooms never see each other; the scene hands every room the
//! same camera position and key state once per frame.

pub mod hallway;
pub mod layout;
pub mod room1;
pub mod room2;

pub use hallway::Hallway;
pub use layout::{Exhibit, Panel, SharedModels, Spotlight};
pub use room1::Room1;
pub use room2::Room2;

use crate::hud::PromptKey;
use crate::inspection::InspectionTarget;
use crate::interaction::{ActivationEvent, InteractionZone, ZoneSet};
use museum_engine::foundation::math::{Mat4, Vec3};
use museum_engine::physics::CollisionModel;
use museum_engine::render::{Light, RenderResult, Renderer};

/// Per-frame input a room reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomInput {
    /// Camera position
    pub actor: Vec3,
    /// Raw state of the interact key
    pub interact: bool,
    /// Raw state of the inspect key
    pub inspect: bool,
}

/// A room of the museum
pub trait Room {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Obstacles of the room
    fn collision(&self) -> &CollisionModel;

    /// React to one frame of input
    ///
    /// # Returns
    /// The exhibit to inspect when the inspect key was just pressed near one
    fn update(&mut self, input: &RoomInput) -> Option<&'static str>;

    /// Advance animations
    fn animate(&mut self, delta_time: f32);

    /// Close-up viewpoint for an exhibit of this room
    fn inspection_target(&self, id: &str) -> Option<&InspectionTarget>;

    /// Lights switched on in this room
    fn lights(&self) -> Vec<Light>;

    /// Key prompt to show after the last update
    fn prompt(&self) -> Option<PromptKey>;

    /// Draw the room
    fn render(&self, renderer: &mut dyn Renderer) -> RenderResult<()>;

    /// Draw only the exhibit `id` with `pivot` applied; `false` when the
    /// exhibit is not in this room
    fn render_exhibit(&self, id: &str, pivot: &Mat4, renderer: &mut dyn Renderer) -> RenderResult<bool>;
}

/// Straight-down spot light
pub(crate) fn ceiling_light(position: Vec3) -> Light {
    Light::spot(position, Vec3::new(0.0, -1.0, 0.0))
}

/// Prompt for whichever zone set has a target, interact first
pub(crate) fn prompt_for(interact: &ZoneSet, inspect: &ZoneSet) -> Option<PromptKey> {
    if interact.target().is_some() {
        Some(PromptKey::Interact)
    } else if inspect.target().is_some() {
        Some(PromptKey::Inspect)
    } else {
        None
    }
}

/// Inspect request from the inspect zones, resolving the zone index to an id
pub(crate) fn inspect_request(
    inspect: &mut ZoneSet,
    targets: &[InspectionTarget],
    input: &RoomInput,
) -> Option<&'static str> {
    let events = inspect.update(&input.actor, input.inspect);
    events
        .iter()
        .filter(|zone_event| zone_event.event == ActivationEvent::Toggled)
        .find_map(|zone_event| targets.get(zone_event.index).map(|target| target.id))
}

/// Inspect zones centred under each target's focus
pub(crate) fn inspect_zones(targets: &[InspectionTarget], radius: f32) -> ZoneSet {
    ZoneSet::new(
        targets
            .iter()
            .map(|target| InteractionZone::new(target.id, target.focus.x, target.focus.z, radius))
            .collect(),
    )
}
