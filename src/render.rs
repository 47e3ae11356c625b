//! Turning a [`GameState`] into windows.
//!
//! The simulation only ever hands a [`Frame`] to a [`Renderer`]. The window backend,
//! [`WindowRenderer`], keeps one borderless always-on-top window per snake segment and
//! one for the fruit, each painted by the clear colour of its own camera.

use bevy::{
    ecs::system::SystemParam,
    prelude::*,
    render::{
        camera::{ClearColorConfig, RenderTarget},
        view::RenderLayers,
    },
    window::{ExitCondition, WindowLevel, WindowPosition, WindowRef, WindowResolution},
};

use crate::config::SnakeConfig;
use crate::error::ConfigError;
use crate::game::{Arena, GameState, Position, Tint};

pub const SNAKE_COLOR: Color = Color::srgb(0.0, 0.5, 0.0);
pub const WARNING_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
pub const FRUIT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

pub const SCORE_WINDOW_SIZE: UVec2 = UVec2::new(150, 100);
/// Only the score window's camera looks at this layer, the tile cameras stay on the default one.
pub const SCORE_LAYER: usize = 1;

/// Everything a renderer needs to draw one state of the game.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Frame<'a> {
    pub segments: &'a [Position],
    pub fruit: Position,
    pub tint: Tint,
    pub score: u32,
}

impl<'a> From<&'a GameState> for Frame<'a> {
    fn from(game: &'a GameState) -> Self {
        Frame {
            segments: game.segments(),
            fruit: game.fruit(),
            tint: game.tint(),
            score: game.score(),
        }
    }
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Maps arena cells to screen pixels.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy)]
pub struct ScreenLayout {
    pub origin: IVec2,
    pub cell_size: u32,
    pub arena: Arena,
}

impl ScreenLayout {
    pub fn from_config(config: &SnakeConfig) -> Self {
        ScreenLayout {
            origin: config.origin,
            cell_size: config.cell_size,
            arena: config.arena,
        }
    }

    /// The largest whole-cell playfield that fits on a screen, centred on it.
    pub fn fit(
        screen_position: IVec2,
        screen_size: UVec2,
        cell_size: u32,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let grid = screen_size - screen_size % cell_size;
        let margin = (screen_size - grid) / 2;

        Ok(ScreenLayout {
            origin: screen_position + margin.as_ivec2(),
            cell_size,
            arena: Arena(grid.x / cell_size, grid.y / cell_size),
        })
    }

    pub fn to_screen(&self, position: Position) -> IVec2 {
        self.origin + IVec2::new(position.0, position.1) * self.cell_size as i32
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.arena.0, self.arena.1) * self.cell_size
    }

    /// Where the score window sits: flush with the playfield's top-right corner.
    pub fn score_anchor(&self) -> IVec2 {
        let right = self.origin.x + self.size().x as i32;
        IVec2::new(right - SCORE_WINDOW_SIZE.x as i32, self.origin.y)
    }
}

pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Normal => SNAKE_COLOR,
        Tint::Warning => WARNING_COLOR,
    }
}

pub fn score_window(layout: &ScreenLayout) -> Window {
    Window {
        title: String::from("Snake Score"),
        resolution: WindowResolution::new(
            SCORE_WINDOW_SIZE.x as f32,
            SCORE_WINDOW_SIZE.y as f32,
        )
        .with_scale_factor_override(1.0),
        position: WindowPosition::At(layout.score_anchor()),
        resizable: false,
        ..default()
    }
}

/// Closing the score window ends the game, whatever tiles are still open.
pub fn window_plugin(layout: &ScreenLayout) -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(score_window(layout)),
        exit_condition: ExitCondition::OnPrimaryClosed,
        ..default()
    }
}

#[derive(Component, Debug)]
pub struct SegmentWindow {
    pub index: usize,
    camera: Entity,
}

#[derive(Component, Debug)]
pub struct FruitWindow;

#[derive(Component, Debug)]
pub struct ScoreText;

pub fn spawn_score_view(mut commands: Commands) {
    commands.spawn((Camera2d, RenderLayers::layer(SCORE_LAYER)));
    commands.spawn((
        Text2d::new("0"),
        TextFont {
            font_size: 80.0,
            ..default()
        },
        TextColor(Color::WHITE),
        RenderLayers::layer(SCORE_LAYER),
        ScoreText,
    ));
}

#[derive(SystemParam)]
pub struct WindowRenderer<'w, 's> {
    commands: Commands<'w, 's>,
    layout: Res<'w, ScreenLayout>,
    segments: Query<'w, 's, (Entity, &'static SegmentWindow, &'static mut Window), Without<FruitWindow>>,
    fruit: Query<'w, 's, &'static mut Window, (With<FruitWindow>, Without<SegmentWindow>)>,
    cameras: Query<'w, 's, &'static mut Camera>,
    score: Query<'w, 's, &'static mut Text2d, With<ScoreText>>,
}

impl Renderer for WindowRenderer<'_, '_> {
    fn render(&mut self, frame: &Frame) {
        let color = tint_color(frame.tint);
        let mut placed = vec![false; frame.segments.len()];

        for (entity, segment, mut window) in &mut self.segments {
            match frame.segments.get(segment.index) {
                Some(&position) => {
                    placed[segment.index] = true;
                    move_window(&mut window, self.layout.to_screen(position));
                    if let Ok(mut camera) = self.cameras.get_mut(segment.camera) {
                        camera.clear_color = ClearColorConfig::Custom(color);
                    }
                }
                None => {
                    self.commands.entity(segment.camera).despawn();
                    self.commands.entity(entity).despawn();
                }
            }
        }

        for (index, &position) in frame.segments.iter().enumerate() {
            if !placed[index] {
                let at = self.layout.to_screen(position);
                let (window, camera) = spawn_tile(&mut self.commands, at, self.layout.cell_size, color);
                self.commands
                    .entity(window)
                    .insert(SegmentWindow { index, camera });
            }
        }

        let fruit = self.layout.to_screen(frame.fruit);
        match self.fruit.get_single_mut() {
            Ok(mut window) => move_window(&mut window, fruit),
            Err(_) => {
                let (window, _) = spawn_tile(&mut self.commands, fruit, self.layout.cell_size, FRUIT_COLOR);
                self.commands.entity(window).insert(FruitWindow);
            }
        }

        for mut text in &mut self.score {
            let score = frame.score.to_string();
            if text.0 != score {
                text.0 = score;
            }
        }
    }
}

/// Despawns tile cameras whose window is gone, e.g. after the user closed it.
pub fn despawn_orphaned_cameras(
    mut commands: Commands,
    cameras: Query<(Entity, &Camera)>,
    windows: Query<(), With<Window>>,
) {
    for (entity, camera) in &cameras {
        if let RenderTarget::Window(WindowRef::Entity(window)) = camera.target {
            if !windows.contains(window) {
                commands.entity(entity).despawn();
            }
        }
    }
}

fn move_window(window: &mut Mut<Window>, at: IVec2) {
    let position = WindowPosition::At(at);
    if window.position != position {
        window.position = position;
    }
}

/// Spawns a square borderless window together with the camera that paints it.
fn spawn_tile(commands: &mut Commands, at: IVec2, size: u32, color: Color) -> (Entity, Entity) {
    let window = commands
        .spawn(Window {
            title: String::from("snake"),
            resolution: WindowResolution::new(size as f32, size as f32)
                .with_scale_factor_override(1.0),
            position: WindowPosition::At(at),
            decorations: false,
            resizable: false,
            focused: false,
            skip_taskbar: true,
            window_level: WindowLevel::AlwaysOnTop,
            ..default()
        })
        .id();

    let camera = commands
        .spawn((
            Camera2d,
            Camera {
                target: RenderTarget::Window(WindowRef::Entity(window)),
                clear_color: ClearColorConfig::Custom(color),
                ..default()
            },
        ))
        .id();

    (window, camera)
}
