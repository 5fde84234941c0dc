//! Map parsing functionality for converting raw board layouts into structured data.

use bevy_ecs::resource::Resource;
use glam::IVec2;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::constants::MapTile;
use crate::error::ParseError;
use crate::systems::components::AdversaryKind;

/// A spawn marker found while parsing a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnMarker {
    Player,
    Adversary(AdversaryKind),
}

/// Represents the parsed data from a raw board layout.
///
/// Kept as a resource so the session can be rebuilt from it on reset.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MapLayout {
    pub width: usize,
    pub height: usize,
    /// Row-major cell contents, spawn cells already cleared to empty.
    pub tiles: Vec<MapTile>,
    /// The player's starting tile.
    pub player_start: IVec2,
    /// Adversary spawns in row-major order, which is also roster order.
    pub adversaries: SmallVec<[(AdversaryKind, IVec2); 4]>,
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile and an optional spawn marker.
    ///
    /// Returns `None` for characters that are not part of the layout alphabet.
    pub fn parse_character(c: char) -> Option<(MapTile, Option<SpawnMarker>)> {
        let tile = match c {
            '#' => MapTile::Wall,
            '.' => MapTile::Pellet,
            '*' => MapTile::PowerPellet,
            'A' => MapTile::Bonus,
            ' ' => MapTile::Empty,
            '-' => MapTile::Door,
            'P' => return Some((MapTile::Empty, Some(SpawnMarker::Player))),
            _ => {
                let kind = AdversaryKind::iter().find(|kind| kind.spawn_symbol() == c)?;
                return Some((MapTile::Empty, Some(SpawnMarker::Adversary(kind))));
            }
        };
        Some((tile, None))
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Fails on an empty layout, rows of differing length, unknown characters, a border
    /// cell that is not a wall, or anything other than exactly one player spawn.
    pub fn parse_layout(rows: &[&str]) -> Result<MapLayout, ParseError> {
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::EmptyLayout);
        }
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut player_start: Option<IVec2> = None;
        let mut adversaries = SmallVec::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                let (tile, marker) =
                    Self::parse_character(character).ok_or(ParseError::UnknownCharacter { character, x, y })?;
                let position = IVec2::new(x as i32, y as i32);

                match marker {
                    Some(SpawnMarker::Player) if player_start.is_some() => {
                        return Err(ParseError::DuplicatePlayerSpawn { x, y });
                    }
                    Some(SpawnMarker::Player) => player_start = Some(position),
                    Some(SpawnMarker::Adversary(kind)) => adversaries.push((kind, position)),
                    None => {}
                }

                tiles.push(tile);
            }
        }

        // The border must be solid so that no traversal can ever step off the grid
        for (index, tile) in tiles.iter().enumerate() {
            let (x, y) = (index % width, index / width);
            let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
            if on_border && *tile != MapTile::Wall {
                return Err(ParseError::OpenBorder { x, y });
            }
        }

        let player_start = player_start.ok_or(ParseError::MissingPlayerSpawn)?;

        Ok(MapLayout {
            width,
            height,
            tiles,
            player_start,
            adversaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_character() {
        assert_eq!(MapTileParser::parse_character('#'), Some((MapTile::Wall, None)));
        assert_eq!(MapTileParser::parse_character('-'), Some((MapTile::Door, None)));
        assert_eq!(
            MapTileParser::parse_character('K'),
            Some((MapTile::Empty, Some(SpawnMarker::Adversary(AdversaryKind::Ambusher))))
        );
        assert_eq!(MapTileParser::parse_character('x'), None);
    }

    #[test]
    fn test_parse_default_board() {
        let layout = MapTileParser::parse_layout(&RAW_BOARD).unwrap();
        assert_eq!(layout.width, 28);
        assert_eq!(layout.height, 27);
        assert_eq!(layout.player_start, IVec2::new(13, 16));

        let kinds: Vec<AdversaryKind> = layout.adversaries.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                AdversaryKind::Ambusher,
                AdversaryKind::Flanker,
                AdversaryKind::Opportunist,
                AdversaryKind::Pursuer
            ]
        );
    }

    #[test]
    fn test_spawn_cells_become_empty() {
        let layout = MapTileParser::parse_layout(&["#####", "#P R#", "#####"]).unwrap();
        assert_eq!(layout.tiles[5 + 1], MapTile::Empty);
        assert_eq!(layout.tiles[5 + 3], MapTile::Empty);
        assert_eq!(layout.adversaries.as_slice(), &[(AdversaryKind::Pursuer, IVec2::new(3, 1))]);
    }

    #[test]
    fn test_repeated_adversary_kinds_each_spawn() {
        let layout = MapTileParser::parse_layout(&["#######", "#R P R#", "#######"]).unwrap();
        assert_eq!(
            layout.adversaries.as_slice(),
            &[
                (AdversaryKind::Pursuer, IVec2::new(1, 1)),
                (AdversaryKind::Pursuer, IVec2::new(5, 1))
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(MapTileParser::parse_layout(&[]), Err(ParseError::EmptyLayout));
        assert_eq!(
            MapTileParser::parse_layout(&["###", "#P", "###"]),
            Err(ParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            MapTileParser::parse_layout(&["###", "#?#", "###"]),
            Err(ParseError::UnknownCharacter { character: '?', x: 1, y: 1 })
        );
        assert_eq!(
            MapTileParser::parse_layout(&["###", "#P.", "###"]),
            Err(ParseError::OpenBorder { x: 2, y: 1 })
        );
        assert_eq!(
            MapTileParser::parse_layout(&["###", "#.#", "###"]),
            Err(ParseError::MissingPlayerSpawn)
        );
        assert_eq!(
            MapTileParser::parse_layout(&["####", "#PP#", "####"]),
            Err(ParseError::DuplicatePlayerSpawn { x: 2, y: 1 })
        );
    }
}
