use std::fmt::{self, Display, Formatter};

use crate::game::{Arena, Position};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    ZeroCellSize,
    ArenaTooSmall(Arena),
    ZeroTickInterval,
    ZeroInitialLength,
    /// The first segment of the starting snake that lies outside the arena.
    SnakeOutsideArena { segment: Position, arena: Arena },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCellSize => write!(f, "cell size must be at least one pixel"),
            ConfigError::ArenaTooSmall(Arena(columns, rows)) => {
                write!(f, "arena {}x{} is smaller than 2x2", columns, rows)
            }
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be non-zero"),
            ConfigError::ZeroInitialLength => write!(f, "the snake needs at least one segment"),
            ConfigError::SnakeOutsideArena {
                segment: Position(x, y),
                arena: Arena(columns, rows),
            } => write!(
                f,
                "starting segment ({}, {}) does not fit in the {}x{} arena",
                x, y, columns, rows
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
