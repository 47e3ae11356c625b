use rand::{rngs::StdRng, SeedableRng};
use window_snake::game::{Arena, DeathCause, Direction, GameState, Position, Rules, TickOutcome};

fn single_segment(start: Position, direction: Direction) -> Rules {
    Rules {
        initial_length: 1,
        start: Some(start),
        start_direction: direction,
        ..Rules::default()
    }
}

/// A quarter turn away from `direction` that stays inside the arena.
fn sidestep(direction: Direction, head: Position) -> Direction {
    match direction {
        Direction::Left | Direction::Right if head.1 > 0 => Direction::Up,
        Direction::Left | Direction::Right => Direction::Down,
        _ if head.0 > 0 => Direction::Left,
        _ => Direction::Right,
    }
}

/// Steers toward the fruit one axis at a time until something other than a plain move happens.
fn chase_fruit(game: &mut GameState, rng: &mut StdRng) -> TickOutcome {
    loop {
        let head = game.head();
        let fruit = game.fruit();
        let wanted = if fruit.0 > head.0 {
            Direction::Right
        } else if fruit.0 < head.0 {
            Direction::Left
        } else if fruit.1 > head.1 {
            Direction::Down
        } else {
            Direction::Up
        };
        if !game.steer(wanted) {
            assert!(game.steer(sidestep(wanted, head)));
        }

        let outcome = game.tick(rng);
        if outcome != TickOutcome::Moved {
            return outcome;
        }
    }
}

#[test]
fn single_segment_tick_moves_the_head() {
    // First seed whose fruit is not on the cell the head moves into.
    let (mut game, mut rng) = (0..)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let game = GameState::new(
                Arena(12, 12),
                single_segment(Position(5, 5), Direction::Right),
                &mut rng,
            )
            .expect("rules fit the arena");
            (game, rng)
        })
        .find(|(game, _)| game.fruit() != Position(6, 5))
        .expect("some seed places the fruit elsewhere");

    assert_eq!(game.tick(&mut rng), TickOutcome::Moved);
    assert_eq!(game.segments(), &[Position(6, 5)]);
    assert_eq!(game.score(), 0);
}

#[test]
fn eating_fruit_grows_and_scores() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut game = GameState::new(
        Arena(12, 12),
        single_segment(Position(5, 5), Direction::Right),
        &mut rng,
    )
    .expect("rules fit the arena");
    let eaten_at = game.fruit();

    assert_eq!(chase_fruit(&mut game, &mut rng), TickOutcome::Ate);
    assert_eq!(game.segments().len(), 2);
    assert_eq!(game.score(), 1);
    assert_eq!(game.head(), eaten_at);
    assert_ne!(game.fruit(), eaten_at);
    assert!(!game.segments().contains(&game.fruit()));
}

#[test]
fn score_keeps_counting_until_death() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut game = GameState::new(
        Arena(16, 16),
        single_segment(Position(8, 8), Direction::Up),
        &mut rng,
    )
    .expect("rules fit the arena");

    for expected in 1..=3 {
        assert_eq!(chase_fruit(&mut game, &mut rng), TickOutcome::Ate);
        assert_eq!(game.score(), expected);
        assert_eq!(game.segments().len(), 1 + expected as usize);
    }

    // Keep going straight until the snake runs into a wall.
    let (score, cause) = loop {
        if let TickOutcome::Died { score, cause } = game.tick(&mut rng) {
            break (score, cause);
        }
    };

    assert!(score >= 3);
    assert_eq!(cause, DeathCause::Wall);
    assert_eq!(game.segments(), &[Position(8, 8)]);
    assert_eq!(game.score(), 0);
}
