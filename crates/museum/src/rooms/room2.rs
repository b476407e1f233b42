//! Room 2: the Pharaonic gallery
//!
//! Reached through a swing door at the end of the hallway. Gallery pieces
//! come from a declarative table; the Buddha triad and the Tutankhamun bust
//! hang on the side walls. A small pyramid in the middle is the one
//! obstacle with a height.

use super::layout::{Exhibit, Panel, SharedModels};
use super::{inspect_request, inspect_zones, prompt_for, Room, RoomInput};
use crate::exhibit::{ExhibitAnimator, Placement};
use crate::hud::PromptKey;
use crate::inspection::InspectionTarget;
use crate::interaction::{ActivationEvent, InteractionZone, ZoneSet};
use museum_engine::assets::{AssetLoader, Model, Vertex};
use museum_engine::foundation::math::{Axis3, Mat4, Mat4Ext, Vec3};
use museum_engine::physics::{Axis, CollisionModel, Direction, HalfPlaneWithGap, Obstacle};
use museum_engine::render::{DrawModels, Light, RenderResult, Renderer, Surface};

/// Half width of the doorway from the hallway
pub const DOORWAY_HALF_WIDTH: f32 = 3.0;
/// Where the door hangs when closed
pub const DOOR_Z: f32 = -23.0;
/// Fully open angle in degrees
pub const DOOR_OPEN_ANGLE: f32 = 90.0;
/// Degrees per second
pub const DOOR_SWING_SPEED: f32 = 90.0;

const DOOR_LABEL: &str = "door";
const DEATH_MASK: &str = "death mask";

const PYRAMID_MIN: [f32; 3] = [-2.0, 0.0, -32.0];
const PYRAMID_MAX: [f32; 3] = [2.0, 3.0, -28.0];
const PYRAMID_COLOR: [f32; 3] = [0.76, 0.6, 0.42];

/// One row of the gallery table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryEntry {
    /// Exhibit identity
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Model path
    pub model: &'static str,
    /// World position
    pub position: [f32; 3],
    /// Rotation about (x, y, z) in degrees, applied Y then X then Z
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
    /// Footprint radius
    pub footprint: f32,
    /// Shown when inspected
    pub description: &'static str,
}

impl GalleryEntry {
    /// Placement built from the table row
    pub fn placement(&self) -> Placement {
        let [x, y, z] = self.position;
        let [rx, ry, rz] = self.rotation;
        let [sx, sy, sz] = self.scale;
        Placement::at(x, y, z)
            .rotate(Axis3::Y, ry)
            .rotate(Axis3::X, rx)
            .rotate(Axis3::Z, rz)
            .scaled_xyz(sx, sy, sz)
    }
}

/// The Pharaonic gallery pieces
pub const GALLERY: [GalleryEntry; 4] = [
    GalleryEntry {
        id: "rosetta",
        name: "Rosetta Stone Replica",
        model: "model/rosetta_stone.glb",
        position: [0.0, 4.0, -36.0],
        rotation: [0.0, 0.0, 0.0],
        scale: [2.0, 2.5, 0.8],
        footprint: 1.5,
        description: "Granodiorite stele with decree in hieroglyphic, Demotic, and Ancient Greek",
    },
    GalleryEntry {
        id: "sphinx",
        name: "Sphinx Bust",
        model: "model/sphinx_bust.glb",
        position: [9.0, 3.0, -30.0],
        rotation: [0.0, -45.0, 0.0],
        scale: [1.8, 1.8, 1.8],
        footprint: 1.5,
        description: "Limestone sphinx head representing royal power and divine wisdom",
    },
    GalleryEntry {
        id: "anubis",
        name: "Anubis Statue",
        model: "model/anubis_statue.glb",
        position: [-6.0, 2.0, -25.0],
        rotation: [0.0, 90.0, 0.0],
        scale: [1.5, 1.5, 1.5],
        footprint: 1.2,
        description: "Black basalt statue of Anubis, jackal-headed god of embalming and the afterlife",
    },
    GalleryEntry {
        id: DEATH_MASK,
        name: "Golden Death Mask",
        model: "model/death_mask.glb",
        position: [6.0, 5.0, -33.0],
        rotation: [0.0, 180.0, 0.0],
        scale: [1.0, 1.0, 1.0],
        footprint: 1.0,
        description: "Gold funerary mask inlaid with lapis lazuli and carnelian, worn by pharaohs in burial",
    },
];

/// Door that swings open into the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct SwingDoor {
    open: bool,
    angle: f32,
}

impl SwingDoor {
    /// A closed door
    pub fn new() -> Self {
        Self {
            open: false,
            angle: 0.0,
        }
    }

    /// Whether the door has been opened
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current swing angle in degrees
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Swing toward the target angle
    pub fn advance(&mut self, delta_time: f32) {
        let target = if self.open { DOOR_OPEN_ANGLE } else { 0.0 };
        let step = DOOR_SWING_SPEED * delta_time;
        self.angle = if self.angle < target {
            (self.angle + step).min(target)
        } else {
            (self.angle - step).max(target)
        };
    }

    /// World matrix for the door panel, hinged at the west jamb
    pub fn matrix(&self) -> Mat4 {
        Mat4::new_translation(&Vec3::new(-DOORWAY_HALF_WIDTH, 4.0, DOOR_Z))
            * Mat4::rotation_about(Axis3::Y, self.angle)
            * Mat4::new_translation(&Vec3::new(DOORWAY_HALF_WIDTH, 0.0, 0.0))
            * Mat4::rotation_about(Axis3::X, -90.0)
            * Mat4::new_nonuniform_scaling(&Vec3::new(1.5, 1.0, 2.0))
    }
}

impl Default for SwingDoor {
    fn default() -> Self {
        Self::new()
    }
}

/// Square pyramid filling the given box
pub fn pyramid_mesh(min: Vec3, max: Vec3) -> Vec<Vertex> {
    let apex = [(min.x + max.x) / 2.0, max.y, (min.z + max.z) / 2.0];
    let corners = [
        [min.x, min.y, max.z],
        [max.x, min.y, max.z],
        [max.x, min.y, min.z],
        [min.x, min.y, min.z],
    ];
    let mut vertices = Vec::with_capacity(12);
    for (i, corner) in corners.iter().enumerate() {
        let next = corners[(i + 1) % corners.len()];
        let a = Vec3::from(*corner);
        let b = Vec3::from(next);
        let normal = (b - a).cross(&(Vec3::from(apex) - a)).normalize();
        for position in [*corner, next, apex] {
            vertices.push(Vertex {
                position,
                normal: normal.into(),
                tex_coord: [0.0, 0.0],
            });
        }
    }
    vertices
}

#[rustfmt::skip]
fn panels() -> Vec<Panel> {
    vec![
        Panel::floor(Placement::at(0.0, 0.0, -30.5).scaled_xyz(6.0, 1.0, 4.0)),
        // South wall either side of the doorway, and above it
        Panel::wall(Placement::at(-7.0, 4.0, -23.0).rotate(Axis3::X, -90.0).scaled_xyz(2.5, 1.0, 4.0)),
        Panel::wall(Placement::at(7.0, 4.0, -23.0).rotate(Axis3::X, -90.0).scaled_xyz(2.5, 1.0, 4.0)),
        Panel::wall(Placement::at(0.0, 6.5, -23.0).rotate(Axis3::X, -90.0).scaled_xyz(2.0, 1.0, 1.5)),
        Panel::wall(Placement::at(0.0, 4.0, -38.0).rotate(Axis3::X, 90.0).scaled_xyz(6.0, 1.0, 4.0)),
        Panel::wall(Placement::at(12.0, 4.0, -28.0).rotate(Axis3::X, 90.0).rotate(Axis3::Z, 90.0).scaled_xyz(5.0, 1.0, 4.0)),
        Panel::wall(Placement::at(-12.0, 4.0, -28.0).rotate(Axis3::X, 90.0).rotate(Axis3::Z, -90.0).scaled_xyz(5.0, 1.0, 4.0)),
        Panel::wall(Placement::at(0.0, 12.0, -28.0).rotate(Axis3::X, 180.0).scaled_xyz(6.0, 1.0, 5.0)),
    ]
}

/// Closed door leaf; overlaps the wall either side of the gap
fn door_footprint() -> Obstacle {
    Obstacle::rotated_rectangle(0.0, DOOR_Z, DOORWAY_HALF_WIDTH + 0.3, 0.3, 0.0)
}

fn obstacles() -> CollisionModel {
    let mut model = CollisionModel::new()
        .with("north wall", HalfPlaneWithGap::new(Axis::Z, -37.0, Direction::Negative))
        .with(
            "east wall",
            HalfPlaneWithGap::new(Axis::X, 11.5, Direction::Positive).with_extent(f32::NEG_INFINITY, -22.0),
        )
        .with(
            "west wall",
            HalfPlaneWithGap::new(Axis::X, -11.5, Direction::Negative).with_extent(f32::NEG_INFINITY, -22.0),
        )
        .with(
            "south wall",
            HalfPlaneWithGap::new(Axis::Z, -23.5, Direction::Positive)
                .with_band(-23.5, -22.0)
                .with_gap(-DOORWAY_HALF_WIDTH, DOORWAY_HALF_WIDTH),
        )
        .with(DOOR_LABEL, door_footprint())
        .with("pyramid", Obstacle::aabb(PYRAMID_MIN.into(), PYRAMID_MAX.into()));
    for entry in &GALLERY {
        let [x, _, z] = entry.position;
        model.push(entry.id, Obstacle::circle(x, z, entry.footprint));
    }
    model
}

/// The Pharaonic gallery
#[derive(Debug, Clone)]
pub struct Room2 {
    models: SharedModels,
    collision: CollisionModel,
    panels: Vec<Panel>,
    exhibits: Vec<Exhibit>,
    door: SwingDoor,
    pyramid: Model,
    interact: ZoneSet,
    inspect: ZoneSet,
    targets: Vec<InspectionTarget>,
}

impl Room2 {
    /// Load the gallery and build its tables
    pub fn new(assets: &mut dyn AssetLoader, models: SharedModels, radius: f32) -> Self {
        let mut exhibits: Vec<Exhibit> = GALLERY
            .iter()
            .map(|entry| {
                let exhibit = Exhibit::load(assets, entry.id, entry.model, entry.placement());
                log::info!(
                    "{}: {}",
                    entry.name,
                    if exhibit.model.is_renderable() { "loaded" } else { "missing" }
                );
                if entry.id == DEATH_MASK {
                    exhibit.floating(ExhibitAnimator::new(0.3, 2.0))
                } else {
                    exhibit
                }
            })
            .collect();
        exhibits.push(Exhibit::load(
            assets,
            "buddha",
            "model/buddha_triad.glb",
            Placement::at(-11.5, 6.0, -30.5)
                .rotate(Axis3::Z, 100.0)
                .rotate(Axis3::X, 57.0)
                .scaled(3.0),
        ));
        exhibits.push(Exhibit::load(
            assets,
            "tutankhamun",
            "model/the_bust_of_pharaoh_tutankhamun.glb",
            Placement::at(11.5, 6.0, -30.5)
                .rotate(Axis3::Z, -100.0)
                .rotate(Axis3::X, 57.0)
                .scaled(3.0),
        ));

        let targets = vec![
            InspectionTarget {
                id: "rosetta",
                focus: Vec3::new(0.0, 4.0, -36.0),
                offset: Vec3::new(0.0, 0.5, 4.0),
                description: GALLERY[0].description,
            },
            InspectionTarget {
                id: "sphinx",
                focus: Vec3::new(9.0, 3.0, -30.0),
                offset: Vec3::new(-2.5, 1.0, 2.5),
                description: GALLERY[1].description,
            },
            InspectionTarget {
                id: "tutankhamun",
                focus: Vec3::new(11.5, 6.0, -30.5),
                offset: Vec3::new(-4.0, 0.0, 0.0),
                description: "Bust of the boy pharaoh Tutankhamun",
            },
        ];
        let inspect = inspect_zones(&targets, radius);
        let [mx, _, mz] = GALLERY[3].position;
        let interact = ZoneSet::new(vec![
            InteractionZone::new(DOOR_LABEL, 0.0, DOOR_Z, radius),
            InteractionZone::new(DEATH_MASK, mx, mz, radius),
        ]);

        let room = Self {
            models,
            collision: obstacles(),
            panels: panels(),
            exhibits,
            door: SwingDoor::new(),
            pyramid: assets.register_mesh("room2/pyramid", pyramid_mesh(PYRAMID_MIN.into(), PYRAMID_MAX.into())),
            interact,
            inspect,
            targets,
        };
        log::debug!(
            "Room2 built: {} obstacles, {} exhibits, {} inspect zones",
            room.collision.len(),
            room.exhibits.len(),
            room.inspect.len()
        );
        room
    }

    /// The swing door
    pub fn door(&self) -> &SwingDoor {
        &self.door
    }

    /// Exhibit by id
    pub fn exhibit(&self, id: &str) -> Option<&Exhibit> {
        self.exhibits.iter().find(|exhibit| exhibit.id == id)
    }

    fn activate(&mut self, zone: usize, actor: &Vec3) {
        let Some(zone_state) = self.interact.get(zone) else {
            return;
        };
        let (label, on) = (zone_state.label(), zone_state.is_active());
        match label {
            DOOR_LABEL => {
                if !on && door_footprint().blocks(actor) {
                    // Closing on the visitor would leave them inside the door
                    if let Some(zone_state) = self.interact.get_mut(zone) {
                        zone_state.set_active(true);
                    }
                    log::info!("Door: standing in the doorway, stays OPEN");
                    return;
                }
                self.door.open = on;
                self.collision.set_enabled(DOOR_LABEL, !on);
                log::info!("Door: {}", if on { "OPEN" } else { "CLOSED" });
            }
            DEATH_MASK => {
                if let Some(mask) = self.exhibits.iter_mut().find(|exhibit| exhibit.id == DEATH_MASK) {
                    mask.toggle_float();
                }
                log::info!("Golden Death Mask: {}", if on { "ON" } else { "OFF" });
            }
            _ => {}
        }
    }
}

impl Room for Room2 {
    fn name(&self) -> &'static str {
        "Room2"
    }

    fn collision(&self) -> &CollisionModel {
        &self.collision
    }

    fn update(&mut self, input: &RoomInput) -> Option<&'static str> {
        let events = self.interact.update(&input.actor, input.interact);
        for zone_event in events {
            if zone_event.event == ActivationEvent::Toggled {
                self.activate(zone_event.index, &input.actor);
            }
        }
        inspect_request(&mut self.inspect, &self.targets, input)
    }

    fn animate(&mut self, delta_time: f32) {
        self.door.advance(delta_time);
        for exhibit in &mut self.exhibits {
            exhibit.advance(delta_time);
        }
    }

    fn inspection_target(&self, id: &str) -> Option<&InspectionTarget> {
        self.targets.iter().find(|target| target.id == id)
    }

    fn lights(&self) -> Vec<Light> {
        Vec::new()
    }

    fn prompt(&self) -> Option<PromptKey> {
        prompt_for(&self.interact, &self.inspect)
    }

    fn render(&self, renderer: &mut dyn Renderer) -> RenderResult<()> {
        self.models.draw_panels(renderer, &self.panels)?;
        let door_surface = match self.models.wall {
            Some(texture) => {
                renderer.bind_texture(texture);
                Surface::Texture(texture)
            }
            None => Surface::Color(Vec3::new(0.45, 0.3, 0.2)),
        };
        renderer.draw_model(&self.models.carpet, &self.door.matrix(), door_surface)?;
        renderer.draw_model(&self.pyramid, &Mat4::identity(), Surface::Color(PYRAMID_COLOR.into()))?;
        for exhibit in &self.exhibits {
            exhibit.draw(renderer)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use museum_engine::assets::ResourceManager;
    use museum_engine::foundation::math::Point3;
    use museum_engine::render::{RecordingRenderer, RenderPass};

    const EPSILON: f32 = 1e-4;

    fn room() -> Room2 {
        let mut assets = ResourceManager::new("/nonexistent/museum-assets");
        let models = SharedModels::load(&mut assets);
        Room2::new(&mut assets, models, 3.0)
    }

    fn input(actor: Vec3, interact: bool) -> RoomInput {
        RoomInput {
            actor,
            interact,
            inspect: false,
        }
    }

    #[test]
    fn test_south_doorway_and_door() {
        let mut room = room();
        let in_doorway = Vec3::new(0.0, 2.0, -23.0);
        assert_eq!(room.collision().first_blocking(&in_doorway), Some(DOOR_LABEL));
        assert!(room.collision().is_blocked(&Vec3::new(4.0, 2.0, -23.0)));

        room.update(&input(Vec3::new(0.0, 2.0, -21.0), true));
        assert!(room.door().is_open());
        assert!(!room.collision().is_blocked(&in_doorway));
        // the wall either side of the gap still blocks
        assert!(room.collision().is_blocked(&Vec3::new(4.0, 2.0, -23.0)));

        room.update(&input(Vec3::new(0.0, 2.0, -21.0), false));
        room.update(&input(Vec3::new(0.0, 2.0, -21.0), true));
        assert!(!room.door().is_open());
        assert!(room.collision().is_blocked(&in_doorway));
    }

    #[test]
    fn test_door_stays_open_while_standing_in_it() {
        let mut room = room();
        let in_doorway = Vec3::new(0.0, 2.0, -23.0);
        room.update(&input(Vec3::new(0.0, 2.0, -21.0), true));
        room.update(&input(in_doorway, false));
        room.update(&input(in_doorway, true));
        assert!(room.door().is_open());
        assert!(!room.collision().is_blocked(&in_doorway));

        // once clear of the leaf the next press closes it
        let clear = Vec3::new(0.0, 2.0, -21.0);
        room.update(&input(clear, false));
        room.update(&input(clear, true));
        assert!(!room.door().is_open());
        assert!(room.collision().is_blocked(&in_doorway));
    }

    #[test]
    fn test_closed_door_covers_the_gap_edges() {
        let room = room();
        for x in [-DOORWAY_HALF_WIDTH, DOORWAY_HALF_WIDTH] {
            assert!(room.collision().is_blocked(&Vec3::new(x, 2.0, DOOR_Z)));
        }
    }

    #[test]
    fn test_door_swings_to_open_angle() {
        let mut door = SwingDoor::new();
        door.open = true;
        door.advance(0.5);
        assert_relative_eq!(door.angle(), 45.0, epsilon = EPSILON);
        door.advance(1.0);
        assert_relative_eq!(door.angle(), DOOR_OPEN_ANGLE, epsilon = EPSILON);
        door.open = false;
        door.advance(2.0);
        assert_relative_eq!(door.angle(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_open_door_lies_along_the_gallery() {
        let mut door = SwingDoor::new();
        door.open = true;
        door.advance(1.0);
        let free_edge = door.matrix().transform_point(&Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(free_edge.x, -DOORWAY_HALF_WIDTH, epsilon = EPSILON);
        assert_relative_eq!(free_edge.z, DOOR_Z - 6.0, epsilon = EPSILON);
    }

    #[test]
    fn test_pyramid_blocks_only_below_its_top() {
        let room = room();
        assert_eq!(room.collision().first_blocking(&Vec3::new(0.0, 2.0, -30.0)), Some("pyramid"));
        assert!(!room.collision().is_blocked(&Vec3::new(0.0, 3.5, -30.0)));
    }

    #[test]
    fn test_pyramid_mesh_faces_outward() {
        let mesh = pyramid_mesh(PYRAMID_MIN.into(), PYRAMID_MAX.into());
        assert_eq!(mesh.len(), 12);
        // first face looks towards +Z
        assert!(mesh[0].normal[2] > 0.0);
        assert!(mesh[0].normal[1] > 0.0);
    }

    #[test]
    fn test_death_mask_floats() {
        let mut room = room();
        room.update(&input(Vec3::new(6.0, 2.0, -35.0), true));
        room.animate(0.5);
        assert!(room.exhibit(DEATH_MASK).is_some_and(|mask| mask.offset() > 0.0));
        assert!(!room.door().is_open());
    }

    #[test]
    fn test_closest_inspect_zone_wins() {
        let mut room = room();
        let request = room.update(&RoomInput {
            actor: Vec3::new(10.8, 2.0, -30.4),
            interact: false,
            inspect: true,
        });
        assert_eq!(request, Some("tutankhamun"));
    }

    #[test]
    fn test_gallery_placements_follow_table() {
        let anubis = GALLERY[2].placement();
        let forward = anubis.matrix().transform_vector(&Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(forward, Vec3::new(1.5, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_render_skips_missing_models_but_draws_pyramid() {
        let room = room();
        let mut renderer = RecordingRenderer::new();
        renderer
            .begin_frame(Vec3::zeros(), &Mat4::identity(), &Mat4::identity())
            .unwrap();
        room.render(&mut renderer).unwrap();
        renderer.end_frame().unwrap();
        assert_eq!(renderer.draws_in(RenderPass::World).len(), 1);
        assert!(renderer.drew(room.pyramid.id));
    }
}
