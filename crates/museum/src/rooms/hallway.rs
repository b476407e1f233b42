//! Hallway between the main hall and the Pharaonic gallery
//!
//! Two glass cabinets stand against the side walls. The interact key toggles
//! the light above whichever cabinet is closest.

use super::layout::{Panel, SharedModels};
use super::{ceiling_light, prompt_for, Room, RoomInput};
use crate::exhibit::Placement;
use crate::hud::PromptKey;
use crate::inspection::InspectionTarget;
use crate::interaction::{ActivationEvent, InteractionZone, ZoneSet};
use museum_engine::assets::{AssetLoader, ExternalModel};
use museum_engine::foundation::math::{Axis3, Mat4, Vec3};
use museum_engine::physics::{Axis, CollisionModel, Direction, HalfPlaneWithGap, Obstacle};
use museum_engine::render::{DrawModels, Light, RenderResult, Renderer};

const WALL_X: f32 = 6.0;
const WALL_MARGIN: f32 = 0.5;
const NORTH_END: f32 = -22.0;
const SOUTH_END: f32 = -15.0;
const CABINET_Z: f32 = -18.5;
const CABINET_LIGHT_HEIGHT: f32 = 10.0;

/// A cabinet and the light above it
#[derive(Debug, Clone, PartialEq)]
pub struct Cabinet {
    /// Zone and log name
    pub label: &'static str,
    /// Model placement
    pub placement: Placement,
    /// Light position
    pub light: Vec3,
    lit: bool,
}

impl Cabinet {
    fn new(label: &'static str, x: f32, facing: f32) -> Self {
        Self {
            label,
            placement: Placement::at(x, 0.0, CABINET_Z)
                .rotate(Axis3::Y, facing)
                .rotate(Axis3::X, -90.0)
                .scaled(0.018),
            light: Vec3::new(x, CABINET_LIGHT_HEIGHT, CABINET_Z),
            lit: false,
        }
    }

    /// Whether the light above is on
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

/// The connecting hallway
#[derive(Debug, Clone)]
pub struct Hallway {
    models: SharedModels,
    cabinet_model: ExternalModel,
    collision: CollisionModel,
    panels: Vec<Panel>,
    cabinets: Vec<Cabinet>,
    interact: ZoneSet,
    inspect: ZoneSet,
}

#[rustfmt::skip]
fn panels() -> Vec<Panel> {
    let back = WALL_X + 0.3;
    vec![
        Panel::floor(Placement::at(0.0, 0.0, CABINET_Z).scaled_xyz(3.0, 1.0, 2.0)),
        Panel::wall(Placement::at(0.0, 12.0, -19.0).rotate(Axis3::X, 180.0).scaled_xyz(3.0, 1.0, 2.5)),
        Panel::wall(Placement::at(WALL_X, 4.0, CABINET_Z).rotate(Axis3::X, 90.0).rotate(Axis3::Z, 90.0).scaled_xyz(2.2, 1.0, 4.0)),
        Panel::wall(Placement::at(back, 4.0, CABINET_Z).rotate(Axis3::X, 90.0).rotate(Axis3::Z, -90.0).scaled_xyz(2.2, 1.0, 4.0)),
        Panel::wall(Placement::at(-WALL_X, 4.0, CABINET_Z).rotate(Axis3::X, 90.0).rotate(Axis3::Z, -90.0).scaled_xyz(2.2, 1.0, 4.0)),
        Panel::wall(Placement::at(-back, 4.0, CABINET_Z).rotate(Axis3::X, 90.0).rotate(Axis3::Z, 90.0).scaled_xyz(2.2, 1.0, 4.0)),
    ]
}

impl Hallway {
    /// Load the cabinet model and build the tables
    pub fn new(assets: &mut dyn AssetLoader, models: SharedModels, radius: f32) -> Self {
        let side = WALL_X - WALL_MARGIN;
        let cabinets = vec![
            Cabinet::new("east cabinet", side, 90.0),
            Cabinet::new("west cabinet", -side, -90.0),
        ];

        let mut collision = CollisionModel::new()
            .with(
                "east wall",
                HalfPlaneWithGap::new(Axis::X, side, Direction::Positive).with_extent(NORTH_END, SOUTH_END),
            )
            .with(
                "west wall",
                HalfPlaneWithGap::new(Axis::X, -side, Direction::Negative).with_extent(NORTH_END, SOUTH_END),
            );
        for cabinet in &cabinets {
            let position = cabinet.placement.translation;
            collision.push(
                "cabinet",
                Obstacle::rotated_rectangle(position.x, position.z, 1.2, 0.6, 90.0),
            );
        }

        let interact = ZoneSet::new(
            cabinets
                .iter()
                .map(|cabinet| {
                    let position = cabinet.placement.translation;
                    InteractionZone::new(cabinet.label, position.x, position.z, radius)
                })
                .collect(),
        );

        let hallway = Self {
            models,
            cabinet_model: assets.load_external_model("model/cabinet2.glb"),
            collision,
            panels: panels(),
            cabinets,
            interact,
            inspect: ZoneSet::default(),
        };
        log::debug!(
            "Hallway built: {} obstacles, {} interact zones",
            hallway.collision.len(),
            hallway.interact.len()
        );
        hallway
    }

    /// Cabinets, east first
    pub fn cabinets(&self) -> &[Cabinet] {
        &self.cabinets
    }
}

impl Room for Hallway {
    fn name(&self) -> &'static str {
        "Hallway"
    }

    fn collision(&self) -> &CollisionModel {
        &self.collision
    }

    fn update(&mut self, input: &RoomInput) -> Option<&'static str> {
        let events = self.interact.update(&input.actor, input.interact);
        for zone_event in events.iter().filter(|e| e.event == ActivationEvent::Toggled) {
            let active = self.interact.is_active(zone_event.index);
            if let Some(cabinet) = self.cabinets.get_mut(zone_event.index) {
                cabinet.lit = active;
                log::info!("{} light: {}", cabinet.label, if active { "ON" } else { "OFF" });
            }
        }
        None
    }

    fn animate(&mut self, _delta_time: f32) {}

    fn inspection_target(&self, _id: &str) -> Option<&InspectionTarget> {
        None
    }

    fn lights(&self) -> Vec<Light> {
        self.cabinets
            .iter()
            .filter(|cabinet| cabinet.lit)
            .map(|cabinet| ceiling_light(cabinet.light))
            .collect()
    }

    fn prompt(&self) -> Option<PromptKey> {
        prompt_for(&self.interact, &self.inspect)
    }

    fn render(&self, renderer: &mut dyn Renderer) -> RenderResult<()> {
        self.models.draw_panels(renderer, &self.panels)?;
        for cabinet in &self.cabinets {
            renderer.draw_external(&self.cabinet_model, &cabinet.placement.matrix())?;
        }
        Ok(())
    }

    fn render_exhibit(&self, _id: &str, _pivot: &Mat4, _renderer: &mut dyn Renderer) -> RenderResult<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museum_engine::assets::ResourceManager;

    fn hallway() -> Hallway {
        let mut assets = ResourceManager::new("/nonexistent/museum-assets");
        let models = SharedModels::load(&mut assets);
        Hallway::new(&mut assets, models, 3.0)
    }

    fn input(actor: Vec3, interact: bool) -> RoomInput {
        RoomInput {
            actor,
            interact,
            inspect: false,
        }
    }

    #[test]
    fn test_side_walls_only_inside_hallway() {
        let hallway = hallway();
        assert!(hallway.collision().is_blocked(&Vec3::new(5.6, 2.0, -17.0)));
        assert!(hallway.collision().is_blocked(&Vec3::new(-5.6, 2.0, -17.0)));
        assert!(!hallway.collision().is_blocked(&Vec3::new(0.0, 2.0, -18.5)));
        // beyond the hallway's ends the side walls do not exist
        assert!(!hallway.collision().is_blocked(&Vec3::new(8.0, 2.0, -10.0)));
        assert!(!hallway.collision().is_blocked(&Vec3::new(8.0, 2.0, -30.0)));
    }

    #[test]
    fn test_cabinet_footprint() {
        let hallway = hallway();
        assert_eq!(hallway.collision().first_blocking(&Vec3::new(5.0, 2.0, -18.5)), Some("cabinet"));
        assert!(!hallway.collision().is_blocked(&Vec3::new(4.5, 2.0, -18.5)));
    }

    #[test]
    fn test_cabinet_light_toggles() {
        let mut hallway = hallway();
        let near_east = Vec3::new(3.5, 2.0, -18.5);

        hallway.update(&input(near_east, true));
        assert!(hallway.cabinets()[0].is_lit());
        assert!(!hallway.cabinets()[1].is_lit());
        assert_eq!(hallway.lights().len(), 1);
        assert_eq!(hallway.prompt(), Some(PromptKey::Interact));

        hallway.update(&input(near_east, false));
        hallway.update(&input(near_east, true));
        assert!(!hallway.cabinets()[0].is_lit());
        assert!(hallway.lights().is_empty());
    }

    #[test]
    fn test_center_of_hallway_is_out_of_reach() {
        let mut hallway = hallway();
        hallway.update(&input(Vec3::new(0.0, 2.0, -18.5), true));
        assert!(hallway.cabinets().iter().all(|cabinet| !cabinet.is_lit()));
        assert_eq!(hallway.prompt(), None);
    }
}
