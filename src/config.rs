use std::time::Duration;

use bevy::prelude::*;

use crate::error::ConfigError;
use crate::game::{Arena, Rules};

#[derive(Resource, Debug, PartialEq, Clone)]
pub struct SnakeConfig {
    /// Edge length in pixels of every segment and fruit window.
    pub cell_size: u32,
    /// Playfield used until the primary monitor is known, or always when not fitting.
    pub arena: Arena,
    /// Top-left pixel of the fallback playfield.
    pub origin: IVec2,
    pub fit_to_monitor: bool,
    pub tick_interval: Duration,
    pub rules: Rules,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        SnakeConfig {
            cell_size: 40,
            arena: Arena(48, 27),
            origin: IVec2::ZERO,
            fit_to_monitor: true,
            tick_interval: Duration::from_millis(100),
            rules: Rules::default(),
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }

        self.rules.validate(self.arena)
    }
}
