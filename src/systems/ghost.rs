use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::constants::TraversalFlags;
use crate::map::builder::TileMap;
use crate::map::coords::CoordinateMapper;
use crate::map::direction::Direction;
use crate::systems::components::{
    Adversary, AdversaryKind, DeltaTime, GhostMode, Motion, PlayerControlled, SimulationRng, Traveler,
};
use crate::systems::movement::{advance, can_traverse, check_alignment, snap_to_tile};
use crate::systems::pathfinding::{shortest_step_direction, shortest_step_direction_avoiding};
use crate::systems::targeting::{target_tile, TargetingContext};

/// Picks a random open direction for a frightened adversary.
///
/// Reversing is only allowed when nothing else is open.
pub fn wander_direction<R: Rng + ?Sized>(
    map: &TileMap,
    tile: IVec2,
    current: Option<Direction>,
    rng: &mut R,
) -> Option<Direction> {
    let reverse = current.map(Direction::opposite);
    let options: SmallVec<[Direction; 4]> = Direction::EXPANSION_ORDER
        .iter()
        .copied()
        .filter(|direction| Some(*direction) != reverse)
        .filter(|direction| can_traverse(map, Traveler::Adversary, tile + direction.as_ivec2()))
        .collect();

    if let Some(direction) = options.choose(rng) {
        return Some(*direction);
    }

    let reverse = reverse.filter(|direction| can_traverse(map, Traveler::Adversary, tile + direction.as_ivec2()));
    if reverse.is_some() {
        trace!(%tile, "Frightened adversary forced to reverse");
    }
    reverse
}

/// Picks the first step toward `target` for an adversary heading in `current`.
///
/// The reverse of `current` is avoided unless it is the only way to reach the target.
/// Returns `None` when the adversary already stands on the target or cannot reach it.
pub fn pursue_direction(map: &TileMap, tile: IVec2, target: IVec2, current: Option<Direction>) -> Option<Direction> {
    let passable = |next: IVec2| can_traverse(map, Traveler::Adversary, next);
    let reverse = current.map(Direction::opposite);

    shortest_step_direction_avoiding(tile, target, reverse, passable).or_else(|| {
        reverse?;
        let forced = shortest_step_direction(tile, target, passable);
        if forced.is_some() {
            trace!(%tile, %target, "Adversary forced to reverse");
        }
        forced
    })
}

/// Moves every adversary one tick, in roster order.
///
/// Decisions are only made on tile centers. Frightened adversaries wander at random; all
/// other modes take the first step of a shortest path toward their mode's target.
pub fn adversary_movement_system(
    map: Res<TileMap>,
    mapper: Res<CoordinateMapper>,
    delta_time: Res<DeltaTime>,
    mut rng: ResMut<SimulationRng>,
    players: Query<&Motion, With<PlayerControlled>>,
    mut adversaries: Query<(Entity, &Adversary, &mut Motion), Without<PlayerControlled>>,
) {
    let player = match players.single() {
        Ok(player) => *player,
        Err(error) => {
            warn!(%error, "No single player for adversaries to chase");
            return;
        }
    };
    let player_tile = mapper.world_to_tile(player.position);

    let mut roster: SmallVec<[(usize, Entity); 4]> = adversaries
        .iter()
        .map(|(entity, adversary, _)| (adversary.slot, entity))
        .collect();
    roster.sort_unstable();

    for (_, entity) in roster {
        // Read after earlier roster entries have moved this tick
        let pursuer_tile = adversaries
            .iter()
            .filter(|(_, adversary, _)| adversary.kind == AdversaryKind::Pursuer)
            .min_by_key(|(_, adversary, _)| adversary.slot)
            .map(|(_, _, motion)| motion.tile);

        let Ok((_, adversary, mut motion)) = adversaries.get_mut(entity) else {
            continue;
        };
        let adversary = *adversary;

        let aligned = check_alignment(&mut motion, delta_time.0, &mapper);
        if aligned {
            snap_to_tile(&mut motion, &mapper);
            let next = match adversary.mode {
                GhostMode::Frightened => wander_direction(&map, motion.tile, motion.direction, &mut rng.0),
                mode => {
                    let ctx = TargetingContext {
                        player_tile,
                        player_facing: player.facing,
                        pursuer_tile,
                        own_tile: motion.tile,
                        scatter_corner: adversary.scatter_corner,
                        house_tile: mapper.world_to_tile(adversary.house),
                    };
                    target_tile(adversary.kind, mode, &ctx)
                        .and_then(|target| map.nearest_passable(target, TraversalFlags::ADVERSARY))
                        .and_then(|target| pursue_direction(&map, motion.tile, target, motion.direction))
                }
            };

            if next != motion.direction {
                trace!(
                    kind = adversary.kind.as_ref(),
                    mode = adversary.mode.as_ref(),
                    tile = %motion.tile,
                    direction = ?next,
                    "Adversary changed direction"
                );
            }
            motion.set_direction(next);
        }

        advance(&mut motion, delta_time.0, aligned, &mapper, |tile| {
            can_traverse(&map, Traveler::Adversary, tile)
        });
    }
}
