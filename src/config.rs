//! Tunable simulation parameters.
//!
//! Defaults come from [`crate::constants`]; the builder methods override single values.

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::constants::{
    ADVERSARY_SPEED, BOARD_ORIGIN, DEFAULT_SEED, FRIGHTENED_DURATION, MAX_DELTA_TIME, PLAYER_SPEED, TILE_SIZE,
};
use crate::error::{GameError, GameResult};
use crate::map::coords::CoordinateMapper;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Size of a tile in world units.
    pub tile_size: f32,
    /// World position of the center of tile (0, 0).
    pub origin: Vec2,
    /// Player speed, in world units per second.
    pub player_speed: f32,
    /// Adversary speed outside of frightened mode, in world units per second.
    pub adversary_speed: f32,
    /// Seconds a power pellet keeps adversaries frightened.
    pub frightened_duration: f32,
    /// Largest frame delta a tick accepts. `None` passes deltas through unclamped.
    pub max_delta_time: Option<f32>,
    /// Seed for frightened-mode random choices.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            origin: BOARD_ORIGIN,
            player_speed: PLAYER_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            frightened_duration: FRIGHTENED_DURATION,
            max_delta_time: Some(MAX_DELTA_TIME),
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_player_speed(mut self, speed: f32) -> Self {
        self.player_speed = speed;
        self
    }

    pub fn with_adversary_speed(mut self, speed: f32) -> Self {
        self.adversary_speed = speed;
        self
    }

    pub fn with_frightened_duration(mut self, seconds: f32) -> Self {
        self.frightened_duration = seconds;
        self
    }

    pub fn with_max_delta_time(mut self, max_delta_time: Option<f32>) -> Self {
        self.max_delta_time = max_delta_time;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The coordinate mapper described by this configuration.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.origin, self.tile_size)
    }

    /// Clamps a raw frame delta into the accepted range.
    ///
    /// Negative and non-finite deltas become zero.
    pub fn clamp_delta(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            return 0.0;
        }
        match self.max_delta_time {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> GameResult<()> {
        let positive = [
            ("tile_size", self.tile_size),
            ("player_speed", self.player_speed),
            ("adversary_speed", self.adversary_speed),
            ("frightened_duration", self.frightened_duration),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameError::InvalidConfig(format!("{name} must be positive and finite, got {value}")));
            }
        }

        if !self.origin.is_finite() {
            return Err(GameError::InvalidConfig(format!("origin must be finite, got {}", self.origin)));
        }

        if let Some(max) = self.max_delta_time {
            if !max.is_finite() || max <= 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "max_delta_time must be positive and finite, got {max}"
                )));
            }
        }

        Ok(())
    }
}
