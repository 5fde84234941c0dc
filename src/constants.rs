//! This module contains all the constants used by the simulation.

use std::time::Duration;

use bitflags::bitflags;
use glam::Vec2;

/// The fixed simulation step used by the headless runner (60 Hz).
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in world units (pixels).
pub const TILE_SIZE: f32 = 32.0;
/// The world position of the center of tile (0, 0).
pub const BOARD_ORIGIN: Vec2 = Vec2::new(200.0, 200.0);

/// Player speed, in world units per second.
pub const PLAYER_SPEED: f32 = TILE_SIZE * 5.0;
/// Adversary speed outside of frightened mode, in world units per second.
pub const ADVERSARY_SPEED: f32 = TILE_SIZE * 4.5;

/// Largest frame delta accepted by a single tick, in seconds.
///
/// At the default speeds this keeps per-tick displacement well under one tile.
pub const MAX_DELTA_TIME: f32 = 1.0 / 20.0;

/// Alignment tolerance for a stationary agent, in world units.
pub const ALIGNMENT_EPSILON: f32 = 0.1;

/// How long a power pellet keeps adversaries frightened, in seconds.
pub const FRIGHTENED_DURATION: f32 = 7.0;

/// Default seed for the frightened-mode random number generator.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

pub mod animation {
    /// Seconds of movement between player animation frames.
    pub const PLAYER_FRAME_TIME: f32 = 0.1;
    /// Number of frames in the player's movement cycle.
    pub const PLAYER_FRAME_COUNT: u8 = 3;
}

pub mod score {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    pub const BONUS: u32 = 100;
}

pub mod targeting {
    /// Tiles ahead of the player the ambusher aims for.
    pub const AMBUSH_LOOKAHEAD: i32 = 4;
    /// Tiles ahead of the player used as the flanker's pivot.
    pub const FLANK_LOOKAHEAD: i32 = 2;
    /// The opportunist only pursues while farther than this many tiles.
    pub const OPPORTUNIST_RADIUS: f32 = 8.0;
}

bitflags! {
    /// Which kinds of agents may occupy a tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TraversalFlags: u8 {
        const PLAYER = 1 << 0;
        const ADVERSARY = 1 << 1;
        const ALL = Self::PLAYER.bits() | Self::ADVERSARY.bits();
    }
}

/// An enum representing the contents of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapTile {
    /// An empty, walkable tile.
    Empty,
    /// A solid wall.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet, frightens every adversary when eaten.
    PowerPellet,
    /// A bonus item.
    Bonus,
    /// The adversary house door. Adversaries may pass, the player may not.
    Door,
}

impl MapTile {
    /// Returns the agents allowed to stand on this tile.
    pub const fn traversal_flags(self) -> TraversalFlags {
        match self {
            MapTile::Wall => TraversalFlags::empty(),
            MapTile::Door => TraversalFlags::ADVERSARY,
            _ => TraversalFlags::ALL,
        }
    }

    /// Returns the score awarded for consuming this tile, if it is consumable.
    pub const fn score_value(self) -> Option<u32> {
        match self {
            MapTile::Pellet => Some(score::PELLET),
            MapTile::PowerPellet => Some(score::POWER_PELLET),
            MapTile::Bonus => Some(score::BONUS),
            _ => None,
        }
    }

    pub const fn is_consumable(self) -> bool {
        self.score_value().is_some()
    }
}

/// The width of the default board, in tiles.
pub const BOARD_WIDTH: usize = 28;
/// The height of the default board, in tiles.
pub const BOARD_HEIGHT: usize = 27;

/// The raw layout of the game board.
///
/// `P` marks the player spawn; `R`, `K`, `C` and `O` mark the pursuer, ambusher,
/// flanker and opportunist spawns inside the house. `-` is the house door.
pub const RAW_BOARD: [&str; BOARD_HEIGHT] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#*####.#####.##.#####.####*#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "######.## ###--### ##.######",
    "######.## #      # ##.######",
    "#     .   #K C O #   .     #",
    "######.## #  R   # ##.######",
    "######.## ######## ##.######",
    "######.##    P   A ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#*..##................##..*#",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];
