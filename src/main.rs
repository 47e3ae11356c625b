use bevy::prelude::*;
use window_snake::{
    config::SnakeConfig,
    render::{window_plugin, ScreenLayout},
    SnakeWindowsPlugin,
};

fn main() -> AppExit {
    let config = SnakeConfig::default();
    let layout = ScreenLayout::from_config(&config);
    let snake = match SnakeWindowsPlugin::new(config) {
        Ok(snake) => snake,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(window_plugin(&layout)))
        .add_plugins(snake)
        .run()
}
