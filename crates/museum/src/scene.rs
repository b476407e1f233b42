//! Scene coordinator
//!
//! Owns the one camera and hands it out per phase: free-roam movement and
//! collision while walking, the inspection controller while an exhibit is
//! being inspected. Rooms only ever see the camera position.

use crate::config::MuseumConfig;
use crate::hud::{Hud, PromptKey};
use crate::inspection::InspectionController;
use crate::exhibit::Placement;
use crate::rooms::layout::{SharedModels, BONES_TEXTURE, FLASHLIGHT_TEXTURE, FLOOR_TEXTURE, WALL_TEXTURE};
use crate::rooms::{Hallway, Room, Room1, Room2, RoomInput};
use museum_engine::assets::{AssetLoader, ModelWithMaterial};
use museum_engine::foundation::collections::TextureHandle;
use museum_engine::foundation::math::{Axis3, Mat4, Vec3};
use museum_engine::input::{CursorTracker, EdgeTrigger, InputSnapshot, MouseButton, Platform};
use museum_engine::render::{
    Camera, CameraMovement, DrawModels, Flashlight, Light, LightingFrame, RenderPass, RenderResult, Renderer,
};
use museum_engine::{AppError, Application};

/// Ceiling lights that are always on, from the main hall to the gallery
pub const CORNER_LIGHTS: [[f32; 3]; 6] = [
    [-12.0, 11.5, -12.0],
    [12.0, 11.5, -12.0],
    [-5.0, 11.5, -20.0],
    [5.0, 11.5, -20.0],
    [-10.0, 11.5, -31.0],
    [10.0, 11.5, -31.0],
];

const FLASHLIGHT_MODEL: &str = "model/Linterna.obj";

/// Height of the single light above an inspected exhibit
const INSPECTION_LIGHT_HEIGHT: f32 = 3.0;

/// Texture files registered at start-up
const TEXTURES: [(&str, &str); 4] = [
    (FLOOR_TEXTURE, "textures/tiles/tiles_0099_color_1k.jpg"),
    (WALL_TEXTURE, "textures/wall/wood_0013_color_1k.jpg"),
    (BONES_TEXTURE, "model/bones.png"),
    (FLASHLIGHT_TEXTURE, "model/Linterna_COLOR.jpg"),
];

/// The whole museum
pub struct SceneCoordinator {
    config: MuseumConfig,
    camera: Camera,
    rooms: Vec<Box<dyn Room>>,
    inspection: InspectionController,
    inspect_key: EdgeTrigger,
    flashlight_key: EdgeTrigger,
    flashlight_on: bool,
    flashlight_model: ModelWithMaterial,
    flashlight_texture: Option<TextureHandle>,
    flashlight_transform: Mat4,
    hud: Hud,
    prompt: Option<PromptKey>,
    last_good: Vec3,
    mouse: CursorTracker,
}

impl SceneCoordinator {
    /// Load every asset and build the rooms
    pub fn new(config: MuseumConfig, assets: &mut dyn AssetLoader) -> Self {
        for (name, path) in TEXTURES {
            assets.load_texture(name, path);
        }
        let models = SharedModels::load(assets);
        let radius = config.interaction.radius;
        let rooms: Vec<Box<dyn Room>> = vec![
            Box::new(Room1::new(assets, models.clone(), radius)),
            Box::new(Hallway::new(assets, models.clone(), radius)),
            Box::new(Room2::new(assets, models, radius)),
        ];

        let camera = Camera::from_settings(&config.camera);
        let flashlight_transform = Placement::at(0.35, -0.4, -0.8)
            .rotate(Axis3::X, -90.0)
            .rotate(Axis3::X, -15.0)
            .rotate(Axis3::Y, 10.0)
            .scaled(0.1)
            .matrix();

        log::info!("Museum ready: {} rooms", rooms.len());
        Self {
            inspection: InspectionController::new(config.interaction.drag_sensitivity),
            last_good: camera.position,
            camera,
            rooms,
            inspect_key: EdgeTrigger::new(),
            flashlight_key: EdgeTrigger::new(),
            flashlight_on: false,
            flashlight_model: assets.load_mesh_with_material(FLASHLIGHT_MODEL),
            flashlight_texture: assets.texture(FLASHLIGHT_TEXTURE),
            flashlight_transform,
            hud: Hud::new(assets),
            prompt: None,
            mouse: CursorTracker::new(),
            config,
        }
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The inspection controller
    pub fn inspection(&self) -> &InspectionController {
        &self.inspection
    }

    /// Whether the flashlight is on
    pub fn flashlight_on(&self) -> bool {
        self.flashlight_on
    }

    /// Prompt shown this frame
    pub fn prompt(&self) -> Option<PromptKey> {
        self.prompt
    }

    /// Rooms in update order
    pub fn rooms(&self) -> &[Box<dyn Room>] {
        &self.rooms
    }

    /// Run one frame of simulation on sampled input
    pub fn step(&mut self, input: &InputSnapshot, delta_time: f32) {
        let controls = self.config.controls;
        let inspect_pressed = self.inspect_key.update(input.is_key_down(controls.inspect));

        if self.flashlight_key.update(input.is_key_down(controls.flashlight)) {
            self.flashlight_on = !self.flashlight_on;
            log::debug!("Flashlight {}", if self.flashlight_on { "on" } else { "off" });
        }

        if self.inspection.is_inspecting() {
            if inspect_pressed {
                self.inspection.exit(&mut self.camera);
                self.mouse.reset();
            } else {
                self.inspection
                    .drag(input.cursor, input.is_mouse_button_down(MouseButton::Left));
            }
            self.prompt = None;
            self.animate(delta_time);
            return;
        }

        self.free_look(input);
        self.walk(input, delta_time);

        let room_input = RoomInput {
            actor: self.camera.position,
            interact: input.is_key_down(controls.interact),
            inspect: input.is_key_down(controls.inspect),
        };
        let mut request = None;
        for room in &mut self.rooms {
            let wanted = room.update(&room_input);
            request = request.or(wanted);
        }
        self.prompt = self.rooms.iter().find_map(|room| room.prompt());

        self.resolve_collision();

        if let Some(id) = request {
            let target = self.rooms.iter().find_map(|room| room.inspection_target(id));
            if let Some(target) = target {
                self.inspection.enter(target, &mut self.camera);
                self.prompt = None;
            }
        }
        self.animate(delta_time);
    }

    fn free_look(&mut self, input: &InputSnapshot) {
        let (dx, dy) = self.mouse.delta(input.cursor);
        if dx != 0.0 || dy != 0.0 {
            self.camera.process_mouse_movement(dx, -dy, true);
        }
        #[allow(clippy::cast_possible_truncation)]
        let scroll = input.scroll as f32;
        if scroll != 0.0 {
            self.camera.process_mouse_scroll(scroll);
        }
    }

    fn walk(&mut self, input: &InputSnapshot, delta_time: f32) {
        let controls = self.config.controls;
        let sprint = input.is_key_down(controls.sprint);
        let bindings = [
            (controls.forward, CameraMovement::Forward),
            (controls.backward, CameraMovement::Backward),
            (controls.left, CameraMovement::Left),
            (controls.right, CameraMovement::Right),
        ];
        for (key, direction) in bindings {
            if input.is_key_down(key) {
                self.camera.process_keyboard(direction, delta_time, sprint);
            }
        }
    }

    fn animate(&mut self, delta_time: f32) {
        for room in &mut self.rooms {
            room.animate(delta_time);
        }
    }

    /// Revert the horizontal move when any room blocks the camera
    ///
    /// # Returns
    /// `true` when the move was reverted
    pub fn resolve_collision(&mut self) -> bool {
        let position = self.camera.position;
        let blocker = self
            .rooms
            .iter()
            .find_map(|room| room.collision().first_blocking(&position).map(|label| (room.name(), label)));

        match blocker {
            Some((room, label)) => {
                log::trace!("Blocked by {} in {} at {:?}", label, room, position);
                self.camera.position.x = self.last_good.x;
                self.camera.position.z = self.last_good.z;
                true
            }
            None => {
                self.last_good = position;
                false
            }
        }
    }

    /// Lighting for the free-roam frame
    pub fn lighting(&self) -> LightingFrame {
        let corners = CORNER_LIGHTS.iter().map(|&position| Light::point(position.into()));
        let flashlight = self.flashlight_on.then(|| Flashlight {
            position: self.camera.position,
            direction: self.camera.front(),
        });
        LightingFrame::new()
            .extend_lights(corners)
            .extend_lights(self.rooms.iter().flat_map(|room| room.lights()))
            .with_flashlight(flashlight)
    }

    fn projection(&self) -> Mat4 {
        self.camera.projection_matrix(
            self.config.aspect_ratio(),
            self.config.camera.near,
            self.config.camera.far,
        )
    }

    fn draw(&self, renderer: &mut dyn Renderer) -> RenderResult<()> {
        renderer.begin_frame(self.config.clear_color(), &self.camera.view_matrix(), &self.projection())?;

        if let Some(target) = self.inspection.target() {
            self.draw_inspected(renderer, target)?;
            return renderer.end_frame();
        }

        renderer.set_lighting(&self.lighting());
        renderer.set_pass(RenderPass::World);
        for room in &self.rooms {
            room.render(renderer)?;
        }

        if self.flashlight_on {
            renderer.set_pass(RenderPass::Viewmodel);
            renderer.draw_with_materials(&self.flashlight_model, &self.flashlight_transform, self.flashlight_texture)?;
        }

        if let Some(key) = self.prompt {
            self.hud.draw(renderer, key)?;
        }
        renderer.end_frame()
    }

    fn draw_inspected(&self, renderer: &mut dyn Renderer, id: &str) -> RenderResult<()> {
        let focus = self
            .rooms
            .iter()
            .find_map(|room| room.inspection_target(id))
            .map_or(self.camera.position, |target| target.focus);
        let lighting = LightingFrame::new().add_light(Light::point(focus + Vec3::new(0.0, INSPECTION_LIGHT_HEIGHT, 0.0)));
        renderer.set_lighting(&lighting);
        renderer.set_pass(RenderPass::World);

        let pivot = self.inspection.rotation_matrix();
        for room in &self.rooms {
            if room.render_exhibit(id, &pivot, renderer)? {
                break;
            }
        }
        Ok(())
    }
}

impl Application for SceneCoordinator {
    fn update(&mut self, platform: &mut dyn Platform, delta_time: f32) -> Result<(), AppError> {
        let input = InputSnapshot::capture(platform, &self.config.controls.watched_keys());
        if input.is_key_down(self.config.controls.quit) {
            log::info!("Quit requested");
            platform.request_close();
        }
        self.step(&input, delta_time);
        Ok(())
    }

    fn render(&mut self, renderer: &mut dyn Renderer) -> Result<(), AppError> {
        self.draw(renderer)?;
        Ok(())
    }

    fn cleanup(&mut self) {
        log::info!("Leaving the museum at {:?}", self.camera.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use museum_engine::assets::ResourceManager;
    use museum_engine::input::{KeyCode, MouseButtons, ScriptedFrame, ScriptedPlatform};
    use museum_engine::render::RecordingRenderer;

    const EPSILON: f32 = 1e-4;
    const DT: f32 = 1.0 / 60.0;

    fn scene() -> SceneCoordinator {
        let mut assets = ResourceManager::new("/nonexistent/museum-assets");
        SceneCoordinator::new(MuseumConfig::default(), &mut assets)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_blocked_move_keeps_height() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(5.0, 2.0, 5.0);
        assert!(!scene.resolve_collision());

        scene.camera.position = Vec3::new(100.0, 2.0, 5.0);
        assert!(scene.resolve_collision());
        assert_eq!(scene.camera.position, Vec3::new(5.0, 2.0, 5.0));
    }

    #[test]
    fn test_revert_does_not_touch_y() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(5.0, 2.0, 5.0);
        scene.resolve_collision();
        scene.camera.position = Vec3::new(100.0, 2.7, 5.0);
        scene.resolve_collision();
        assert_eq!(scene.camera.position, Vec3::new(5.0, 2.7, 5.0));
    }

    #[test]
    fn test_north_doorway_from_spawn() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(0.0, 2.0, -14.2);
        assert!(!scene.resolve_collision());
        scene.camera.position = Vec3::new(6.0, 2.0, -14.2);
        assert!(scene.resolve_collision());
        assert_relative_eq!(scene.camera.position.x, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_walking_forward_moves_along_front() {
        let mut scene = scene();
        let start = scene.camera.position;
        scene.step(&InputSnapshot::with_keys(&[KeyCode::W]), 0.1);
        assert_relative_eq!(scene.camera.position.z, start.z - 0.25, epsilon = EPSILON);
        assert_relative_eq!(scene.camera.position.y, start.y, epsilon = EPSILON);
    }

    #[test]
    fn test_flashlight_toggles_on_press() {
        let mut scene = scene();
        let held = InputSnapshot::with_keys(&[KeyCode::F]);
        scene.step(&held, DT);
        scene.step(&held, DT);
        assert!(scene.flashlight_on());
        assert!(scene.lighting().flashlight.is_some());

        scene.step(&idle(), DT);
        scene.step(&held, DT);
        assert!(!scene.flashlight_on());
        assert!(scene.lighting().flashlight.is_none());
    }

    #[test]
    fn test_lighting_starts_with_corner_lights() {
        let scene = scene();
        let lighting = scene.lighting();
        assert_eq!(lighting.lights.len(), CORNER_LIGHTS.len());
        assert_eq!(lighting.positions()[0], Vec3::new(-12.0, 11.5, -12.0));
    }

    #[test]
    fn test_spotlight_joins_lighting_after_interaction() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(-14.8, 2.0, -7.0);
        scene.last_good = scene.camera.position;
        scene.step(&InputSnapshot::with_keys(&[KeyCode::E]), DT);
        let lighting = scene.lighting();
        assert_eq!(lighting.lights.len(), CORNER_LIGHTS.len() + 1);
        assert_eq!(lighting.positions()[CORNER_LIGHTS.len()], Vec3::new(-17.0, 18.0, -7.0));
    }

    #[test]
    fn test_door_cannot_close_on_the_visitor() {
        let mut scene = scene();
        let press = InputSnapshot::with_keys(&[KeyCode::E]);
        scene.camera.position = Vec3::new(0.0, 2.0, -21.0);
        scene.last_good = scene.camera.position;
        scene.step(&press, DT);

        scene.camera.position = Vec3::new(0.0, 2.0, -23.0);
        scene.last_good = scene.camera.position;
        scene.step(&idle(), DT);
        scene.step(&press, DT);

        let back = InputSnapshot::with_keys(&[KeyCode::S]);
        for _ in 0..60 {
            scene.step(&back, DT);
        }
        assert!(scene.camera.position.z > -22.0);
    }

    #[test]
    fn test_inspection_round_trip_through_input() {
        let mut scene = scene();
        let start = Vec3::new(-2.0, 2.0, 22.5);
        scene.camera.position = start;
        scene.last_good = start;
        let yaw = scene.camera.yaw;

        let inspect = InputSnapshot::with_keys(&[KeyCode::I]);
        scene.step(&inspect, DT);
        assert_eq!(scene.inspection().target(), Some("skull"));
        assert_relative_eq!(scene.camera.position, Vec3::new(-2.0, 5.0, 23.0), epsilon = EPSILON);

        // Held key does not leave
        scene.step(&inspect, DT);
        assert!(scene.inspection().is_inspecting());

        // Movement keys are ignored while inspecting
        scene.step(&InputSnapshot::with_keys(&[KeyCode::W]), DT);
        assert_relative_eq!(scene.camera.position, Vec3::new(-2.0, 5.0, 23.0), epsilon = EPSILON);

        scene.step(&inspect, DT);
        assert!(!scene.inspection().is_inspecting());
        assert_relative_eq!(scene.camera.position, start, epsilon = EPSILON);
        assert_relative_eq!(scene.camera.yaw, yaw, epsilon = EPSILON);
    }

    #[test]
    fn test_drag_rotates_inspected_exhibit() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(-2.0, 2.0, 22.5);
        scene.last_good = scene.camera.position;
        scene.step(&InputSnapshot::with_keys(&[KeyCode::I]), DT);

        let drag = |x: f64| idle().with_cursor(x, 0.0).with_buttons(MouseButtons::LEFT);
        scene.step(&drag(100.0), DT);
        scene.step(&drag(140.0), DT);
        let (rotation_y, rotation_x) = scene.inspection().rotation();
        assert_relative_eq!(rotation_y, 20.0, epsilon = EPSILON);
        assert_relative_eq!(rotation_x, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_inspection_renders_single_exhibit_pass() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(-2.0, 2.0, 22.5);
        scene.last_good = scene.camera.position;
        scene.step(&InputSnapshot::with_keys(&[KeyCode::I]), DT);

        let mut renderer = RecordingRenderer::new();
        scene.draw(&mut renderer).unwrap();
        let lighting = renderer.last_lighting().unwrap();
        assert_eq!(lighting.lights.len(), 1);
        assert!(renderer.draws_in(RenderPass::Overlay).is_empty());
    }

    #[test]
    fn test_prompt_is_drawn_in_overlay() {
        let mut scene = scene();
        scene.camera.position = Vec3::new(-14.8, 2.0, -7.0);
        scene.last_good = scene.camera.position;
        scene.step(&idle(), DT);
        assert_eq!(scene.prompt(), Some(PromptKey::Interact));

        let mut renderer = RecordingRenderer::new();
        scene.draw(&mut renderer).unwrap();
        let overlay = renderer.draws_in(RenderPass::Overlay);
        assert_eq!(overlay.len(), 1);
        assert!(renderer.drew(scene.hud.glyph(PromptKey::Interact).id));
    }

    #[test]
    fn test_quit_key_closes_platform() {
        let mut scene = scene();
        let mut platform = ScriptedPlatform::new(vec![
            ScriptedFrame::new(),
            ScriptedFrame::new().holding(&[KeyCode::Escape]),
            ScriptedFrame::new(),
            ScriptedFrame::new(),
        ]);
        let mut renderer = RecordingRenderer::new();
        let frames = museum_engine::run(&mut scene, &mut platform, &mut renderer).unwrap();
        assert_eq!(frames, 2);
        assert_eq!(renderer.frames(), 2);
    }
}
