//! Per-kind target selection for adversaries.

use glam::IVec2;

use crate::constants::targeting::{AMBUSH_LOOKAHEAD, FLANK_LOOKAHEAD, OPPORTUNIST_RADIUS};
use crate::map::direction::Direction;
use crate::systems::components::{AdversaryKind, GhostMode};

/// Everything a targeting strategy may look at, in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingContext {
    pub player_tile: IVec2,
    /// The player's last travel direction, kept while the player is stopped.
    /// `None` before the player has moved, which adds no lookahead.
    pub player_facing: Option<Direction>,
    /// The tile of the first pursuer in the roster, if there is one.
    pub pursuer_tile: Option<IVec2>,
    pub own_tile: IVec2,
    pub scatter_corner: IVec2,
    pub house_tile: IVec2,
}

type ChaseStrategy = fn(&TargetingContext) -> IVec2;

/// Chase strategies, indexed by [`AdversaryKind::as_usize`].
const CHASE_STRATEGIES: [ChaseStrategy; 4] = [pursue, ambush, flank, opportunist];

fn lookahead(ctx: &TargetingContext, tiles: i32) -> IVec2 {
    ctx.player_facing.map_or(IVec2::ZERO, |facing| facing.as_ivec2() * tiles)
}

fn pursue(ctx: &TargetingContext) -> IVec2 {
    ctx.player_tile
}

fn ambush(ctx: &TargetingContext) -> IVec2 {
    ctx.player_tile + lookahead(ctx, AMBUSH_LOOKAHEAD)
}

/// Reflects a point ahead of the player through the pursuer.
fn flank(ctx: &TargetingContext) -> IVec2 {
    let pivot = ctx.player_tile + lookahead(ctx, FLANK_LOOKAHEAD);
    match ctx.pursuer_tile {
        Some(pursuer) => pursuer + (pivot - pursuer) * 2,
        None => pivot,
    }
}

fn opportunist(ctx: &TargetingContext) -> IVec2 {
    if ctx.own_tile.as_vec2().distance(ctx.player_tile.as_vec2()) > OPPORTUNIST_RADIUS {
        ctx.player_tile
    } else {
        ctx.scatter_corner
    }
}

/// The raw chase target for a kind, before any mode override.
pub fn chase_target(kind: AdversaryKind, ctx: &TargetingContext) -> IVec2 {
    CHASE_STRATEGIES[kind.as_usize()](ctx)
}

/// The tile an adversary navigates toward in its current mode.
///
/// Scatter overrides every kind with the scatter corner and Eaten with the house.
/// Frightened adversaries wander instead of targeting, so they get `None`.
/// The result may lie inside a wall or off the map.
pub fn target_tile(kind: AdversaryKind, mode: GhostMode, ctx: &TargetingContext) -> Option<IVec2> {
    match mode {
        GhostMode::Scatter => Some(ctx.scatter_corner),
        GhostMode::Eaten => Some(ctx.house_tile),
        GhostMode::Frightened => None,
        GhostMode::Chase => Some(chase_target(kind, ctx)),
    }
}
