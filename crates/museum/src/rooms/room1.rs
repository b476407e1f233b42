//! Room 1: the main hall
//!
//! Fossils in the middle behind rope barriers, a giant skull further south,
//! and a row of display tables along the west wall. Interacting with an
//! exhibit on a table switches on the spotlight above it for good.

use super::layout::{Exhibit, Panel, SharedModels, Spotlight, BONES_TEXTURE};
use super::{ceiling_light, inspect_request, prompt_for, Room, RoomInput};
use crate::exhibit::{ExhibitAnimator, Placement};
use crate::hud::PromptKey;
use crate::inspection::InspectionTarget;
use crate::interaction::{ActivationEvent, InteractionZone, ZoneSet};
use museum_engine::assets::{AssetLoader, ExternalModel};
use museum_engine::foundation::math::{Axis3, Mat4, Vec3};
use museum_engine::physics::{Axis, CollisionModel, Direction, HalfPlaneWithGap, Obstacle};
use museum_engine::render::{DrawModels, Light, RenderResult, Renderer};

/// Room1 north doorway half width
pub const DOORWAY_HALF_WIDTH: f32 = 4.0;

const FLOAT_AMPLITUDE: f32 = 0.3;
const FLOAT_SPEED: f32 = 2.0;

/// Table spotlights hang here, indexed west front to east back
const SPOTLIGHT_SPOTS: [(f32, f32); 6] = [
    (-17.0, -7.0),
    (-17.0, 10.0),
    (-17.0, 27.0),
    (17.0, -7.0),
    (17.0, 10.0),
    (17.0, 27.0),
];
const SPOTLIGHT_FIXTURE_HEIGHT: f32 = 20.0;
const SPOTLIGHT_LIGHT_HEIGHT: f32 = 18.0;

/// (x, z, rotation) of each rope barrier; the first four ring the fossils
const ROPE_BARRIERS: [(f32, f32, f32); 8] = [
    (4.0, -1.0, 90.0),
    (-4.0, -1.0, 270.0),
    (0.0, 4.0, 180.0),
    (0.0, -6.0, 0.0),
    (7.0, 15.0, 90.0),
    (-7.0, 15.0, 270.0),
    (0.0, 20.0, 180.0),
    (0.0, 9.0, 0.0),
];
const ROPE_HALF_LENGTH: f32 = 1.5;
const ROPE_HALF_WIDTH: f32 = 0.3;
const ROPE_HEIGHT: f32 = 1.6;

/// Only the front and back tables on the west side carry a showcase
const TABLES: [(f32, f32); 2] = [(-17.0, -7.0), (-17.0, 27.0)];

/// Reach of the skull's inspect zone; the plinth and ropes keep visitors further out than the usual radius
const SKULL_REACH: f32 = 6.0;

/// What pressing the interact key does at each zone
#[derive(Debug, Clone, Copy)]
struct Interaction {
    exhibit: &'static str,
    spotlight: usize,
}

const INTERACTIONS: [Interaction; 3] = [
    Interaction {
        exhibit: "effigy",
        spotlight: 0,
    },
    Interaction {
        exhibit: "coffin",
        spotlight: 2,
    },
    Interaction {
        exhibit: "mourning",
        spotlight: 1,
    },
];

fn obstacles() -> CollisionModel {
    let mut model = CollisionModel::new()
        .with(
            "south wall",
            HalfPlaneWithGap::new(Axis::Z, 33.5, Direction::Positive).with_band(33.5, 35.0),
        )
        .with(
            "east wall",
            HalfPlaneWithGap::new(Axis::X, 23.5, Direction::Positive).with_extent(-14.0, 34.0),
        )
        .with(
            "west wall",
            HalfPlaneWithGap::new(Axis::X, -23.5, Direction::Negative).with_extent(-14.0, 34.0),
        )
        .with(
            "north wall",
            HalfPlaneWithGap::new(Axis::Z, -13.5, Direction::Negative)
                .with_band(-15.0, -13.5)
                .with_gap(-DOORWAY_HALF_WIDTH, DOORWAY_HALF_WIDTH),
        )
        .with("fossils", Obstacle::circle(0.0, 0.0, 2.5));

    for &(x, z) in &TABLES {
        model.push("table", Obstacle::circle(x, z, 2.0));
    }
    for &(x, z, rotation) in &ROPE_BARRIERS {
        model.push(
            "rope barrier",
            Obstacle::rotated_rectangle(x, z, ROPE_HALF_LENGTH, ROPE_HALF_WIDTH, rotation),
        );
    }
    model
        .with("skull", Obstacle::circle(-2.0, 17.0, 3.5))
        .with("mourning", Obstacle::circle(-17.0, 10.0, 1.5))
}

#[rustfmt::skip]
fn panels() -> Vec<Panel> {
    vec![
        Panel::floor(Placement::at(0.0, 0.0, 10.0).scaled_xyz(12.0, 1.0, 12.0)),
        // South
        Panel::wall(Placement::at(0.0, 12.0, 34.0).rotate(Axis3::X, -90.0).scaled_xyz(12.0, 1.0, 12.0)),
        // East
        Panel::wall(Placement::at(24.0, 12.0, 10.0).rotate(Axis3::X, 90.0).rotate(Axis3::Z, 90.0).scaled_xyz(12.0, 1.0, 12.0)),
        // West
        Panel::wall(Placement::at(-24.0, 12.0, 10.0).rotate(Axis3::X, 90.0).rotate(Axis3::Z, -90.0).scaled_xyz(12.0, 1.0, 12.0)),
        // North, either side of the doorway, front and back faces
        Panel::wall(Placement::at(-14.0, 12.0, -14.0).rotate(Axis3::X, 90.0).scaled_xyz(5.0, 1.0, 12.0)),
        Panel::wall(Placement::at(14.0, 12.0, -14.0).rotate(Axis3::X, 90.0).scaled_xyz(5.0, 1.0, 12.0)),
        Panel::wall(Placement::at(-14.0, 12.0, -14.3).rotate(Axis3::X, -90.0).scaled_xyz(5.0, 1.0, 12.0)),
        Panel::wall(Placement::at(14.0, 12.0, -14.3).rotate(Axis3::X, -90.0).scaled_xyz(5.0, 1.0, 12.0)),
        // Above the doorway
        Panel::wall(Placement::at(0.0, 16.0, -14.0).rotate(Axis3::X, 90.0).scaled_xyz(4.0, 1.0, 4.0)),
        Panel::wall(Placement::at(0.0, 16.0, -14.3).rotate(Axis3::X, -90.0).scaled_xyz(4.0, 1.0, 4.0)),
        // Ceiling
        Panel::wall(Placement::at(0.0, 24.0, 10.0).rotate(Axis3::X, 180.0).scaled_xyz(12.0, 1.0, 12.0)),
    ]
}

#[rustfmt::skip]
fn skirting() -> Vec<Placement> {
    vec![
        Placement::at(0.0, 0.0, 33.5).rotate(Axis3::X, -90.0).scaled_xyz(50.0, 1.0, 0.5),
        Placement::at(23.5, 0.0, 10.0).rotate(Axis3::Y, 90.0).rotate(Axis3::X, -90.0).scaled_xyz(50.0, 1.0, 0.5),
        Placement::at(-23.5, 0.0, 10.0).rotate(Axis3::Y, -90.0).rotate(Axis3::X, -90.0).scaled_xyz(50.0, 1.0, 0.5),
        Placement::at(-14.0, 0.0, -13.5).rotate(Axis3::Y, -180.0).rotate(Axis3::X, -90.0).scaled_xyz(20.0, 1.0, 0.5),
        Placement::at(14.0, 0.0, -13.5).rotate(Axis3::Y, -180.0).rotate(Axis3::X, -90.0).scaled_xyz(20.0, 1.0, 0.5),
    ]
}

fn inspection_targets() -> Vec<InspectionTarget> {
    vec![
        InspectionTarget {
            id: "effigy",
            focus: Vec3::new(-17.5, 3.0, -7.0),
            offset: Vec3::new(4.0, 1.0, 0.0),
            description: "Funerary effigy of a reclining noble",
        },
        InspectionTarget {
            id: "coffin",
            focus: Vec3::new(-17.0, 3.0, 26.5),
            offset: Vec3::new(4.0, 1.0, 0.0),
            description: "Painted Egyptian coffin",
        },
        InspectionTarget {
            id: "skull",
            focus: Vec3::new(-2.0, 4.0, 17.0),
            offset: Vec3::new(0.0, 1.0, 6.0),
            description: "Cast of a giant prehistoric skull",
        },
    ]
}

/// The main hall
#[derive(Debug, Clone)]
pub struct Room1 {
    models: SharedModels,
    collision: CollisionModel,
    panels: Vec<Panel>,
    skirting_model: ExternalModel,
    skirting: Vec<Placement>,
    rope_model: ExternalModel,
    exhibits: Vec<Exhibit>,
    showcases: Vec<Placement>,
    spotlights: Vec<Spotlight>,
    interact: ZoneSet,
    inspect: ZoneSet,
    targets: Vec<InspectionTarget>,
}

impl Room1 {
    /// Load the room's models and build its tables
    pub fn new(assets: &mut dyn AssetLoader, models: SharedModels, radius: f32) -> Self {
        let floating = || ExhibitAnimator::new(FLOAT_AMPLITUDE, FLOAT_SPEED);
        let exhibits = vec![
            Exhibit::load(
                assets,
                "fossils",
                "model/fossils.glb",
                Placement::at(0.0, 0.0, 0.0)
                    .rotate(Axis3::X, -90.0)
                    .rotate(Axis3::Z, 45.0)
                    .scaled(0.015),
            )
            .with_fallback_texture(assets.texture(BONES_TEXTURE)),
            Exhibit::load(
                assets,
                "effigy",
                "model/effigy.glb",
                Placement::at(-17.5, 2.5, -7.0)
                    .rotate(Axis3::Y, 120.0)
                    .rotate(Axis3::X, -90.0)
                    .rotate(Axis3::Y, -90.0)
                    .scaled(1.2),
            )
            .with_fallback_texture(assets.texture(BONES_TEXTURE))
            .floating(floating()),
            Exhibit::load(
                assets,
                "coffin",
                "model/egyptian_coffin.glb",
                Placement::at(-17.0, 2.5, 26.5)
                    .rotate(Axis3::Z, 270.0)
                    .rotate(Axis3::Y, -10.0)
                    .rotate(Axis3::X, -50.0)
                    .rotate(Axis3::Y, -20.0)
                    .rotate(Axis3::Z, -20.0)
                    .rotate(Axis3::Y, 20.0)
                    .scaled(0.5),
            )
            .floating(floating()),
            Exhibit::load(
                assets,
                "mourning",
                "model/mourning_female.glb",
                Placement::at(-17.0, 1.0, 10.0)
                    .rotate(Axis3::Y, 90.0)
                    .rotate(Axis3::X, -120.0)
                    .scaled(5.0),
            ),
            Exhibit::load(
                assets,
                "tiger painting",
                "model/tiger_painting.glb",
                Placement::at(21.8, 11.0, 11.0)
                    .rotate(Axis3::Y, 90.0)
                    .rotate(Axis3::Z, -65.0)
                    .rotate(Axis3::Y, 20.0)
                    .rotate(Axis3::X, 2.0)
                    .scaled(5.0),
            ),
            Exhibit::load(
                assets,
                "chandelier",
                "model/chandlier.glb",
                Placement::at(0.0, 24.0, 10.0).rotate(Axis3::X, -90.0).scaled(10.0),
            ),
            Exhibit::load(
                assets,
                "skull",
                "model/skull.glb",
                Placement::at(-2.0, -10.0, 17.0).rotate(Axis3::X, -90.0).scaled(10.0),
            ),
        ];

        let targets = inspection_targets();
        let inspect = ZoneSet::new(
            targets
                .iter()
                .map(|target| {
                    let reach = if target.id == "skull" { SKULL_REACH } else { radius };
                    InteractionZone::new(target.id, target.focus.x, target.focus.z, reach)
                })
                .collect(),
        );
        let interact = ZoneSet::new(
            INTERACTIONS
                .iter()
                .filter_map(|interaction| {
                    let exhibit = exhibits.iter().find(|exhibit| exhibit.id == interaction.exhibit)?;
                    let position = exhibit.position();
                    Some(InteractionZone::new(interaction.exhibit, position.x, position.z, radius))
                })
                .collect(),
        );

        let room = Self {
            models,
            collision: obstacles(),
            panels: panels(),
            skirting_model: assets.load_external_model("model/skirtingboard.glb"),
            skirting: skirting(),
            rope_model: assets.load_external_model("model/rope_barrier.glb"),
            exhibits,
            showcases: TABLES
                .iter()
                .map(|&(x, z)| Placement::at(x, 4.0, z).rotate(Axis3::Y, 90.0))
                .collect(),
            spotlights: SPOTLIGHT_SPOTS
                .iter()
                .map(|&(x, z)| Spotlight::hanging(x, z, SPOTLIGHT_FIXTURE_HEIGHT, SPOTLIGHT_LIGHT_HEIGHT))
                .collect(),
            interact,
            inspect,
            targets,
        };
        log::debug!(
            "Room1 built: {} obstacles, {} interact zones, {} inspect zones",
            room.collision.len(),
            room.interact.len(),
            room.inspect.len()
        );
        room
    }

    /// Exhibit by id
    pub fn exhibit(&self, id: &str) -> Option<&Exhibit> {
        self.exhibits.iter().find(|exhibit| exhibit.id == id)
    }

    /// Table spotlights in [`SPOTLIGHT_SPOTS`] order
    pub fn spotlights(&self) -> &[Spotlight] {
        &self.spotlights
    }

    fn activate(&mut self, zone: usize) {
        let Some(interaction) = INTERACTIONS.get(zone) else {
            return;
        };
        let Some(zone_state) = self.interact.get(zone) else {
            return;
        };
        let on = zone_state.is_active();

        if let Some(exhibit) = self.exhibits.iter_mut().find(|exhibit| exhibit.id == interaction.exhibit) {
            exhibit.toggle_float();
        }
        log::info!("{}: {}", interaction.exhibit, if on { "ON" } else { "OFF" });

        if on {
            if let Some(spotlight) = self.spotlights.get_mut(interaction.spotlight) {
                if spotlight.light_up() {
                    log::info!("Table spotlight {} switched on", interaction.spotlight);
                }
            }
        }
    }
}

impl Room for Room1 {
    fn name(&self) -> &'static str {
        "Room1"
    }

    fn collision(&self) -> &CollisionModel {
        &self.collision
    }

    fn update(&mut self, input: &RoomInput) -> Option<&'static str> {
        let events = self.interact.update(&input.actor, input.interact);
        for zone_event in events {
            if zone_event.event == ActivationEvent::Toggled {
                self.activate(zone_event.index);
            }
        }
        inspect_request(&mut self.inspect, &self.targets, input)
    }

    fn animate(&mut self, delta_time: f32) {
        for exhibit in &mut self.exhibits {
            exhibit.advance(delta_time);
        }
    }

    fn inspection_target(&self, id: &str) -> Option<&InspectionTarget> {
        self.targets.iter().find(|target| target.id == id)
    }

    fn lights(&self) -> Vec<Light> {
        self.spotlights
            .iter()
            .filter(|spotlight| spotlight.is_lit())
            .map(|spotlight| ceiling_light(spotlight.light))
            .collect()
    }

    fn prompt(&self) -> Option<PromptKey> {
        prompt_for(&self.interact, &self.inspect)
    }

    fn render(&self, renderer: &mut dyn Renderer) -> RenderResult<()> {
        self.models.draw_panels(renderer, &self.panels)?;
        for placement in &self.skirting {
            renderer.draw_external(&self.skirting_model, &placement.matrix())?;
        }
        for &(x, z, rotation) in &ROPE_BARRIERS {
            let placement = Placement::at(x, ROPE_HEIGHT, z)
                .rotate(Axis3::Y, rotation)
                .rotate(Axis3::X, -90.0)
                .scaled(0.05);
            renderer.draw_external(&self.rope_model, &placement.matrix())?;
        }
        for placement in &self.showcases {
            renderer.draw_external(&self.models.showcase, &placement.matrix())?;
        }
        for exhibit in &self.exhibits {
            exhibit.draw(renderer)?;
        }
        for spotlight in &self.spotlights {
            spotlight.draw(renderer, &self.models)?;
        }
        Ok(())
    }

    fn render_exhibit(&self, id: &str, pivot: &Mat4, renderer: &mut dyn Renderer) -> RenderResult<bool> {
        let Some(exhibit) = self.exhibit(id) else {
            return Ok(false);
        };
        exhibit.draw_with_pivot(renderer, pivot)?;
        Ok(true)
    }
}
