//! Map construction and tile queries.

use bevy_ecs::resource::Resource;
use glam::IVec2;
use tracing::debug;

use crate::constants::{MapTile, TraversalFlags};
use crate::map::parser::MapLayout;

/// The tile grid: fixed geometry plus mutable cell contents.
///
/// Every coordinate handed to the accessors must be in bounds. The border is solid wall,
/// so any traversal that only moves between passable neighbors satisfies this.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<MapTile>,
}

impl TileMap {
    /// Builds a fresh map from a parsed layout, with every pellet in place.
    pub fn from_layout(layout: &MapLayout) -> Self {
        debug!(width = layout.width, height = layout.height, "Building tile map");
        Self {
            width: layout.width,
            height: layout.height,
            tiles: layout.tiles.clone(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the tile lies inside the grid.
    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < self.width && (tile.y as usize) < self.height
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| tile.y as usize * self.width + tile.x as usize)
    }

    /// Returns the content of a cell.
    ///
    /// Reading outside the grid is a programming error; release builds read it as wall.
    pub fn tile_at(&self, tile: IVec2) -> MapTile {
        debug_assert!(self.in_bounds(tile), "tile {tile} is outside the {}x{} map", self.width, self.height);
        self.index(tile).map_or(MapTile::Wall, |index| self.tiles[index])
    }

    pub fn is_wall(&self, tile: IVec2) -> bool {
        self.tile_at(tile) == MapTile::Wall
    }

    /// Returns `true` if an agent with the given flags may enter the tile.
    pub fn can_traverse(&self, tile: IVec2, flags: TraversalFlags) -> bool {
        self.tile_at(tile).traversal_flags().contains(flags)
    }

    /// Walls and the door block the player.
    pub fn is_player_passable(&self, tile: IVec2) -> bool {
        self.can_traverse(tile, TraversalFlags::PLAYER)
    }

    /// Only walls block adversaries.
    pub fn is_adversary_passable(&self, tile: IVec2) -> bool {
        self.can_traverse(tile, TraversalFlags::ADVERSARY)
    }

    /// Reads a cell and clears it if it held something edible.
    ///
    /// Returns the previous content. Walls, the door and empty cells are left untouched,
    /// so consuming the same tile twice yields `Empty` the second time.
    pub fn consume(&mut self, tile: IVec2) -> MapTile {
        debug_assert!(self.in_bounds(tile), "tile {tile} is outside the {}x{} map", self.width, self.height);
        let Some(index) = self.index(tile) else {
            return MapTile::Wall;
        };

        let content = self.tiles[index];
        if content.is_consumable() {
            self.tiles[index] = MapTile::Empty;
        }
        content
    }

    /// Counts the pellets and power pellets still on the map.
    pub fn remaining_pellets(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, MapTile::Pellet | MapTile::PowerPellet))
            .count()
    }

    /// Returns the passable tile closest to `target`.
    ///
    /// The target is clamped into the grid first. Distance is squared Euclidean, ties go to the
    /// first tile in row-major order. Returns `None` only if no tile admits `flags`.
    pub fn nearest_passable(&self, target: IVec2, flags: TraversalFlags) -> Option<IVec2> {
        let max = IVec2::new(self.width as i32 - 1, self.height as i32 - 1);
        let target = target.clamp(IVec2::ZERO, max);
        if self.can_traverse(target, flags) {
            return Some(target);
        }

        (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| IVec2::new(x, y)))
            .filter(|tile| self.can_traverse(*tile, flags))
            .min_by_key(|tile| (*tile - target).length_squared())
    }

    /// Iterates over every cell with its coordinate, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        self.tiles.iter().enumerate().map(|(index, tile)| {
            let position = IVec2::new((index % self.width) as i32, (index / self.width) as i32);
            (position, *tile)
        })
    }
}
