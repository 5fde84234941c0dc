//! Conversion between continuous world positions and discrete tile coordinates.

use bevy_ecs::resource::Resource;
use glam::{IVec2, Vec2};

use crate::constants::{ALIGNMENT_EPSILON, BOARD_ORIGIN, TILE_SIZE};

/// Maps world space onto the tile grid.
///
/// Tile `(0, 0)` is centered on `origin`, and each tile spans `tile_size` world units.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub origin: Vec2,
    pub tile_size: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            origin: BOARD_ORIGIN,
            tile_size: TILE_SIZE,
        }
    }
}

impl CoordinateMapper {
    pub fn new(origin: Vec2, tile_size: f32) -> Self {
        Self { origin, tile_size }
    }

    /// The tile whose center is nearest to `position`.
    pub fn world_to_tile(&self, position: Vec2) -> IVec2 {
        ((position - self.origin) / self.tile_size).round().as_ivec2()
    }

    /// The world position of a tile's center.
    pub fn tile_to_world(&self, tile: IVec2) -> Vec2 {
        self.origin + tile.as_vec2() * self.tile_size
    }
}

/// The per-axis tolerance used by [`is_center_aligned`].
///
/// Half of this tick's displacement, so a moving agent cannot step over a tile center
/// between two checks. Never smaller than [`ALIGNMENT_EPSILON`].
pub fn alignment_tolerance(velocity: Vec2) -> f32 {
    ALIGNMENT_EPSILON.max(0.5 * velocity.length())
}

/// Returns `true` if `position` is within tolerance of `center` on both axes.
pub fn is_center_aligned(center: Vec2, position: Vec2, velocity: Vec2) -> bool {
    let tolerance = alignment_tolerance(velocity);
    let offset = (position - center).abs();
    offset.x < tolerance && offset.y < tolerance
}
