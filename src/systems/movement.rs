use glam::{IVec2, Vec2};

use crate::map::builder::TileMap;
use crate::map::coords::{is_center_aligned, CoordinateMapper};
use crate::map::direction::Direction;
use crate::systems::components::{Motion, Traveler};

/// Returns `true` if `traveler` may enter `tile`.
pub fn can_traverse(map: &TileMap, traveler: Traveler, tile: IVec2) -> bool {
    map.can_traverse(tile, traveler.traversal_flags())
}

/// The displacement the agent would cover this tick along its current direction.
pub fn planned_step(motion: &Motion, dt: f32) -> Vec2 {
    motion
        .direction
        .map_or(Vec2::ZERO, |direction| direction.as_vec2() * motion.speed * dt)
}

/// Refreshes the cached tile and reports whether the agent sits on its tile center.
///
/// The tolerance is half of this tick's planned step.
pub fn check_alignment(motion: &mut Motion, dt: f32, mapper: &CoordinateMapper) -> bool {
    motion.tile = mapper.world_to_tile(motion.position);
    is_center_aligned(mapper.tile_to_world(motion.tile), motion.position, planned_step(motion, dt))
}

/// Snaps the agent exactly onto its tile center.
pub fn snap_to_tile(motion: &mut Motion, mapper: &CoordinateMapper) {
    motion.position = mapper.tile_to_world(motion.tile);
}

/// Distance along `direction` to the first tile center strictly ahead of `position`.
fn distance_to_next_center(position: Vec2, direction: Direction, mapper: &CoordinateMapper) -> f32 {
    let center = mapper.tile_to_world(mapper.world_to_tile(position));
    let offset = (center - position).dot(direction.as_vec2());
    if offset > 0.0 {
        offset
    } else {
        offset + mapper.tile_size
    }
}

/// Integrates one tick of motion along the current direction.
///
/// While aligned, the agent stops instead of moving if the next tile in its direction is
/// not passable. Mid-tile movement is never blocked. A step never carries the agent past
/// the next tile center; it lands exactly on it instead, so every center gets checked.
pub fn advance<F>(motion: &mut Motion, dt: f32, aligned: bool, mapper: &CoordinateMapper, passable: F)
where
    F: Fn(IVec2) -> bool,
{
    let Some(direction) = motion.direction else {
        motion.stop();
        return;
    };

    if aligned && !passable(motion.tile + direction.as_ivec2()) {
        motion.stop();
        return;
    }

    let step = motion.speed * dt;
    let remaining = distance_to_next_center(motion.position, direction, mapper);
    let next = if step >= remaining {
        mapper.tile_to_world(mapper.world_to_tile(motion.position + direction.as_vec2() * remaining))
    } else {
        motion.position + direction.as_vec2() * step
    };

    motion.velocity = next - motion.position;
    motion.position = next;
    motion.tile = mapper.world_to_tile(motion.position);
}
