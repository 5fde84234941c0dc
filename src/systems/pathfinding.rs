//! Breadth-first pathfinding over the tile grid.
//!
//! Only the first step of the shortest path is ever needed, so the search is rerun from
//! scratch on every decision instead of caching routes.

use glam::IVec2;
use pathfinding::prelude::bfs;
use smallvec::SmallVec;

use crate::map::direction::Direction;

/// Returns the direction of the first step along a shortest path from `source` to `target`.
///
/// Neighbors are expanded in [`Direction::EXPANSION_ORDER`], which fixes tie-breaking between
/// equally short paths. Returns `None` if `source == target` or `target` is unreachable.
/// `passable` must reject every tile outside the grid; a walled border guarantees this.
pub fn shortest_step_direction<F>(source: IVec2, target: IVec2, passable: F) -> Option<Direction>
where
    F: Fn(IVec2) -> bool,
{
    shortest_step_direction_avoiding(source, target, None, passable)
}

/// Like [`shortest_step_direction`], but the first step may not go in `forbidden_first`.
///
/// Later steps are unrestricted, so a path that turns around further along is still found.
pub fn shortest_step_direction_avoiding<F>(
    source: IVec2,
    target: IVec2,
    forbidden_first: Option<Direction>,
    passable: F,
) -> Option<Direction>
where
    F: Fn(IVec2) -> bool,
{
    if source == target {
        return None;
    }
    let blocked = forbidden_first.map(|direction| source + direction.as_ivec2());

    let path = bfs(
        &source,
        |&tile| {
            Direction::EXPANSION_ORDER
                .iter()
                .map(move |direction| tile + direction.as_ivec2())
                .filter(|next| passable(*next))
                .filter(|next| tile != source || Some(*next) != blocked)
                .collect::<SmallVec<[IVec2; 4]>>()
        },
        |&tile| tile == target,
    )?;

    let first_step = *path.get(1)?;
    Direction::from_delta(first_step - source)
}
