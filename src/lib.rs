pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;

use bevy::{
    prelude::*,
    window::{Monitor, PrimaryMonitor, PrimaryWindow, WindowPosition},
};
use rand::{rngs::StdRng, SeedableRng};

use config::SnakeConfig;
use error::ConfigError;
use game::{GameState, TickOutcome};
use render::{Frame, Renderer, ScreenLayout, WindowRenderer};

/// The running game and the randomness that feeds it.
#[derive(Resource, Clone)]
pub struct Game {
    pub state: GameState,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &SnakeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: &SnakeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SnakeConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config.arena, config.rules.clone(), &mut rng)?;
        Ok(Game { state, rng })
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.state.tick(&mut self.rng)
    }

    pub fn resize(&mut self, layout: &ScreenLayout) -> Result<(), ConfigError> {
        self.state.resize(layout.arena, &mut self.rng)
    }
}

fn advance_game(mut game: ResMut<Game>) {
    match game.tick() {
        TickOutcome::Moved => {}
        TickOutcome::Ate => debug!("fruit eaten, score {}", game.state.score()),
        TickOutcome::Died { score, cause } => info!("snake died ({:?}) with score {}", cause, score),
        TickOutcome::Cleared { score } => info!("arena cleared with score {}", score),
    }
}

fn render_game(game: Res<Game>, mut renderer: WindowRenderer) {
    renderer.render(&Frame::from(&game.state));
}

fn fit_to_primary_monitor(
    monitors: Query<&Monitor, Added<PrimaryMonitor>>,
    config: Res<SnakeConfig>,
    mut layout: ResMut<ScreenLayout>,
    mut game: ResMut<Game>,
    mut score_windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(monitor) = monitors.get_single() else {
        return;
    };

    let fitted = match ScreenLayout::fit(
        monitor.physical_position,
        UVec2::new(monitor.physical_width, monitor.physical_height),
        config.cell_size,
    )
    .and_then(|fitted| game.resize(&fitted).map(|()| fitted))
    {
        Ok(fitted) => fitted,
        Err(e) => {
            warn!("keeping the configured playfield, the monitor does not fit: {}", e);
            return;
        }
    };

    info!(
        "playfield fitted to monitor: {}x{} cells at {}",
        fitted.arena.0, fitted.arena.1, fitted.origin
    );
    *layout = fitted;
    for mut window in &mut score_windows {
        window.position = WindowPosition::At(fitted.score_anchor());
    }
}

pub struct SnakeWindowsPlugin {
    config: SnakeConfig,
    game: Game,
}

impl SnakeWindowsPlugin {
    /// Fails if the configuration cannot produce a playable round.
    pub fn new(config: SnakeConfig) -> Result<Self, ConfigError> {
        let game = Game::new(&config)?;
        Ok(SnakeWindowsPlugin { config, game })
    }
}

impl Plugin for SnakeWindowsPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "starting on a {}x{} arena, ticking every {:?}",
            self.config.arena.0, self.config.arena.1, self.config.tick_interval
        );

        app.insert_resource(self.config.clone())
            .insert_resource(ScreenLayout::from_config(&self.config))
            .insert_resource(self.game.clone())
            .insert_resource(Time::<Fixed>::from_duration(self.config.tick_interval))
            .add_systems(Startup, render::spawn_score_view)
            .add_systems(
                Update,
                (
                    fit_to_primary_monitor.run_if(|config: Res<SnakeConfig>| config.fit_to_monitor),
                    input::read_keyboard,
                    render::despawn_orphaned_cameras,
                    render_game.run_if(
                        resource_changed::<Game>.or(resource_changed::<ScreenLayout>),
                    ),
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, advance_game);
    }
}
