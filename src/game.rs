//! The snake simulation.
//!
//! Everything here works in arena cells and knows nothing about windows; the
//! [`crate::render`] module turns a [`GameState`] into pixels.

use std::ops::{Add, Mul, Sub};

use rand::prelude::*;

use crate::error::ConfigError;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Position(pub i32, pub i32);

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Position(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Position(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    fn mul(self, rhs: i32) -> Self::Output {
        Position(self.0 * rhs, self.1 * rhs)
    }
}

/// Screen convention: `y` grows downwards.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    pub fn offset(self) -> Position {
        match self {
            Direction::Left => Position(-1, 0),
            Direction::Right => Position(1, 0),
            Direction::Down => Position(0, 1),
            Direction::Up => Position(0, -1),
        }
    }
}

/// Playable bounds in cells: `Arena(columns, rows)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Arena(pub u32, pub u32);

impl Arena {
    pub fn contains(&self, position: Position) -> bool {
        position.0 >= 0
            && position.1 >= 0
            && (position.0 as u32) < self.0
            && (position.1 as u32) < self.1
    }

    pub fn center(&self) -> Position {
        Position((self.0 / 2) as i32, (self.1 / 2) as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.0 as usize * self.1 as usize
    }

    /// Distance in cells from `position` to the closest edge, `0` on the border row/column.
    fn edge_distance(&self, position: Position) -> i32 {
        let right = self.0 as i32 - 1 - position.0;
        let bottom = self.1 as i32 - 1 - position.1;
        position.0.min(position.1).min(right).min(bottom)
    }
}

/// The knobs a round of snake is played with.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Rules {
    pub initial_length: usize,
    /// Head cell after a reset; the arena centre when `None`.
    pub start: Option<Position>,
    pub start_direction: Direction,
    /// Ignore a turn straight back into the neck while longer than one segment.
    pub anti_reversal: bool,
    pub warning_margin: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            initial_length: 6,
            start: None,
            start_direction: Direction::Down,
            anti_reversal: true,
            warning_margin: 5,
        }
    }
}

impl Rules {
    /// The snake a round starts with. The body trails behind the head, opposite to the start direction.
    pub fn initial_segments(&self, arena: Arena) -> Vec<Position> {
        let head = self.start.unwrap_or_else(|| arena.center());
        let behind = self.start_direction.opposite().offset();

        (0..self.initial_length as i32)
            .map(|i| head + behind * i)
            .collect()
    }

    /// Checks that a round with these rules can be played on `arena`.
    pub fn validate(&self, arena: Arena) -> Result<(), ConfigError> {
        if arena.0 < 2 || arena.1 < 2 {
            return Err(ConfigError::ArenaTooSmall(arena));
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }

        match self
            .initial_segments(arena)
            .into_iter()
            .find(|&segment| !arena.contains(segment))
        {
            Some(segment) => Err(ConfigError::SnakeOutsideArena { segment, arena }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Tint {
    Normal,
    Warning,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeathCause {
    Wall,
    Tail,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TickOutcome {
    Moved,
    Ate,
    Died { score: u32, cause: DeathCause },
    /// The snake covers the whole arena, so there is nowhere left for fruit.
    Cleared { score: u32 },
}

#[derive(Debug, Clone)]
pub struct GameState {
    arena: Arena,
    rules: Rules,
    segments: Vec<Position>,
    /// Requested by the player, applied on the next tick.
    direction: Direction,
    /// Travelled on the last tick.
    heading: Direction,
    fruit: Position,
    score: u32,
}

impl GameState {
    pub fn new(arena: Arena, rules: Rules, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        rules.validate(arena)?;
        let segments = rules.initial_segments(arena);
        let direction = rules.start_direction;
        let fruit = generate_random_position(arena, &segments, rng).unwrap_or_default();

        Ok(GameState {
            arena,
            rules,
            segments,
            direction,
            heading: direction,
            fruit,
            score: 0,
        })
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tint(&self) -> Tint {
        if self.arena.edge_distance(self.head()) <= self.rules.warning_margin as i32 {
            Tint::Warning
        } else {
            Tint::Normal
        }
    }

    /// Requests a new direction for the next tick; the latest accepted request wins.
    ///
    /// Returns `false` when the request is a reversal into the neck and the rules forbid it.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.rules.anti_reversal
            && self.segments.len() > 1
            && direction == self.heading.opposite()
        {
            return false;
        }

        self.direction = direction;
        true
    }

    pub fn tick(&mut self, rng: &mut impl Rng) -> TickOutcome {
        self.heading = self.direction;
        let head = self.head() + self.heading.offset();

        if !self.arena.contains(head) {
            return self.die(DeathCause::Wall, rng);
        }

        let grows = head == self.fruit;
        // The tail cell is vacated this tick unless the snake grows.
        let occupied = if grows {
            self.segments.len()
        } else {
            self.segments.len() - 1
        };
        if self.segments[..occupied].contains(&head) {
            return self.die(DeathCause::Tail, rng);
        }

        self.segments.insert(0, head);
        if !grows {
            self.segments.pop();
            return TickOutcome::Moved;
        }

        self.score += 1;
        match generate_random_position(self.arena, &self.segments, rng) {
            Some(fruit) => {
                self.fruit = fruit;
                TickOutcome::Ate
            }
            None => {
                let score = self.score;
                self.reset(rng);
                TickOutcome::Cleared { score }
            }
        }
    }

    /// Starts a fresh round on a different arena. The state is left untouched if the rules do not fit it.
    pub fn resize(&mut self, arena: Arena, rng: &mut impl Rng) -> Result<(), ConfigError> {
        self.rules.validate(arena)?;
        self.arena = arena;
        self.reset(rng);
        Ok(())
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.segments = self.rules.initial_segments(self.arena);
        self.direction = self.rules.start_direction;
        self.heading = self.direction;
        self.score = 0;
        self.fruit = generate_random_position(self.arena, &self.segments, rng).unwrap_or_default();
    }

    fn die(&mut self, cause: DeathCause, rng: &mut impl Rng) -> TickOutcome {
        let score = self.score;
        self.reset(rng);
        TickOutcome::Died { score, cause }
    }
}

/// Picks a random cell of `arena` that is not in `taken`, or `None` if every cell is taken.
pub fn generate_random_position(
    arena: Arena,
    taken: &[Position],
    rng: &mut impl Rng,
) -> Option<Position> {
    let mut all_positions = Vec::with_capacity(arena.cell_count());

    for x in 0..arena.0 {
        for y in 0..arena.1 {
            all_positions.push(Position(x as i32, y as i32))
        }
    }

    all_positions.retain(|position| !taken.contains(position));
    all_positions.choose(rng).copied()
}
