//! Headless simulation core for a tile-based maze chase game.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod systems;
