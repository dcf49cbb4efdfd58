use color_eyre::Result;
use log::info;

use common::config::{Config, SceneConfig};
use common::context::WindowPlatform;
use common::debug;
use common::frame_loop::FrameLoop;
use scenes::{LitScene, UnlitScene};

mod scenes;

fn main() -> Result<()> {
    color_eyre::install()?;

    let loaded = Config::load(Config::DEFAULT_PATH)?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();
    debug::set_up_logging(config.log_level)?;

    if found {
        info!("Loaded config from {}", Config::DEFAULT_PATH);
    } else {
        info!("No config at {}, using defaults", Config::DEFAULT_PATH);
    }

    let mut platform = WindowPlatform::new(&config.window)?;
    let mut frame_loop = FrameLoop::from_config(&config);

    info!("Starting {:?} scene", config.scene);

    match &config.scene {
        SceneConfig::Unlit => {
            let mut scene = UnlitScene::new(platform.display()?)?;
            frame_loop.run(&mut platform, &mut scene)
        }
        SceneConfig::Lit => {
            let mut scene = LitScene::cubes(platform.display()?)?;
            frame_loop.run(&mut platform, &mut scene)
        }
        SceneConfig::Model { path } => {
            let mut scene = LitScene::model(platform.display()?, path)?;
            frame_loop.run(&mut platform, &mut scene)
        }
    }
}
