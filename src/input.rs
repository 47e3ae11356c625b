use bevy::prelude::*;

use crate::game::Direction;
use crate::Game;

const DIRECTION_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::KeyW, Direction::Up),
    (KeyCode::ArrowUp, Direction::Up),
    (KeyCode::KeyS, Direction::Down),
    (KeyCode::ArrowDown, Direction::Down),
    (KeyCode::KeyA, Direction::Left),
    (KeyCode::ArrowLeft, Direction::Left),
    (KeyCode::KeyD, Direction::Right),
    (KeyCode::ArrowRight, Direction::Right),
];

const QUIT_KEY: KeyCode = KeyCode::KeyQ;

pub fn direction_for(key: KeyCode) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|&(_, direction)| direction)
}

pub fn read_keyboard(
    input: Res<ButtonInput<KeyCode>>,
    mut game: ResMut<Game>,
    mut exit: EventWriter<AppExit>,
) {
    if input.just_pressed(QUIT_KEY) {
        info!("quit requested at score {}", game.state.score());
        exit.send(AppExit::Success);
        return;
    }

    // Fixed key order, so keys pressed in the same frame resolve the same way every run.
    for &(_, direction) in DIRECTION_KEYS.iter().filter(|(key, _)| input.just_pressed(*key)) {
        if !game.state.steer(direction) {
            debug!("ignored reversal to {:?}", direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnakeConfig;
    use crate::game::{Arena, Position, Rules};

    fn app(initial_length: usize) -> App {
        let config = SnakeConfig {
            arena: Arena(10, 10),
            rules: Rules {
                initial_length,
                start: Some(Position(5, 5)),
                start_direction: Direction::Right,
                ..default()
            },
            ..default()
        };

        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(Game::seeded(&config, 3).expect("valid config"))
            .add_systems(Update, read_keyboard);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.clear();
        input.press(key);
    }

    fn direction(app: &App) -> Direction {
        app.world().resource::<Game>().state.direction()
    }

    #[test]
    fn letters_and_arrows_map_to_the_same_direction() {
        assert_eq!(direction_for(KeyCode::KeyW), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::KeyA), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::ArrowRight), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::ArrowDown), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::KeyQ), None);
        assert_eq!(direction_for(KeyCode::Space), None);
    }

    #[test]
    fn key_press_steers_the_snake() {
        let mut app = app(3);

        press(&mut app, KeyCode::KeyW);
        app.update();
        assert_eq!(direction(&app), Direction::Up);

        press(&mut app, KeyCode::ArrowDown);
        app.update();
        assert_eq!(direction(&app), Direction::Down);
    }

    #[test]
    fn reversal_key_is_ignored() {
        let mut app = app(3);

        press(&mut app, KeyCode::KeyA);
        app.update();

        assert_eq!(direction(&app), Direction::Right);
    }

    fn press_together(app: &mut App, keys: &[KeyCode]) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.clear();
        for &key in keys {
            input.press(key);
        }
    }

    #[test]
    fn keys_pressed_in_one_frame_resolve_in_key_order() {
        for _ in 0..8 {
            let mut app = app(3);

            press_together(&mut app, &[KeyCode::ArrowDown, KeyCode::KeyW]);
            app.update();
            assert_eq!(direction(&app), Direction::Down);

            press_together(&mut app, &[KeyCode::ArrowRight, KeyCode::KeyS, KeyCode::KeyW]);
            app.update();
            assert_eq!(direction(&app), Direction::Right);
        }
    }

    #[test]
    fn quit_key_requests_exit() {
        let mut app = app(1);

        press(&mut app, KeyCode::KeyQ);
        app.update();

        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }
}
