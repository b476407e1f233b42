//! Museum walkthrough binary
//!
//! `museum [config.toml]`. With the `windowed` feature the museum opens in a
//! window; otherwise a scripted tour runs headless and logs frame stats.

use museum::{MuseumConfig, SceneCoordinator};
use museum_engine::assets::ResourceManager;
use museum_engine::config::Config;
use museum_engine::foundation::logging;
use museum_engine::render::StatsRenderer;

const DEFAULT_CONFIG: &str = "museum.toml";
const STATS_INTERVAL: u64 = 120;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = MuseumConfig::load_or_default(&config_path)?;
    logging::init_with_level(config.level_filter());
    if !std::path::Path::new(&config_path).exists() {
        log::warn!("{config_path} not found, running with default settings");
    }
    log::info!("Configuration from {config_path}, assets under {}", config.assets_root.display());

    let mut assets = ResourceManager::new(config.assets_root.clone());
    let mut scene = SceneCoordinator::new(config.clone(), &mut assets);
    let stats = assets.stats();
    log::info!(
        "Loaded {} meshes and {} textures ({} failed)",
        stats.meshes,
        stats.textures,
        stats.failed_loads
    );

    let mut renderer = StatsRenderer::new(STATS_INTERVAL);
    let frames = run_platform(&config, &mut scene, &mut renderer)?;
    log::info!("Ran {frames} frames");
    Ok(())
}

#[cfg(feature = "windowed")]
fn run_platform(
    config: &MuseumConfig,
    scene: &mut SceneCoordinator,
    renderer: &mut StatsRenderer,
) -> Result<u64, Box<dyn std::error::Error>> {
    use museum_engine::input::GlfwPlatform;

    let window = &config.window;
    let mut platform = GlfwPlatform::new(&window.title, window.width, window.height)?;
    Ok(museum_engine::run(scene, &mut platform, renderer)?)
}

#[cfg(not(feature = "windowed"))]
fn run_platform(
    config: &MuseumConfig,
    scene: &mut SceneCoordinator,
    renderer: &mut StatsRenderer,
) -> Result<u64, Box<dyn std::error::Error>> {
    log::info!("Built without a window; running the guided tour");
    let mut platform = museum::tour::guided_tour(&config.controls);
    Ok(museum_engine::run(scene, &mut platform, renderer)?)
}
