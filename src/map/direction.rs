use glam::{IVec2, Vec2};
use strum_macros::AsRefStr;

/// The four cardinal directions.
///
/// Screen coordinates are used throughout: +x is right and +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is just a convenience constant for iterating over the directions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Neighbor expansion order used by pathfinding and random choices: +x, -x, +y, -y.
    pub const EXPANSION_ORDER: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Down, Direction::Up];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the direction as a unit tile offset.
    pub const fn as_ivec2(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    /// Returns the direction as a unit world-space vector.
    pub fn as_vec2(self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// Returns the direction as a usize (0-3). Constant time.
    /// This is useful for indexing into arrays.
    pub const fn as_usize(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Converts a tile delta into a direction using the sign of each component.
    ///
    /// Returns `None` for a zero delta or a diagonal one.
    pub fn from_delta(delta: IVec2) -> Option<Direction> {
        match delta.signum().to_array() {
            [1, 0] => Some(Direction::Right),
            [-1, 0] => Some(Direction::Left),
            [0, 1] => Some(Direction::Down),
            [0, -1] => Some(Direction::Up),
            _ => None,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        dir.as_ivec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::DIRECTIONS {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.as_ivec2() + direction.opposite().as_ivec2(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_from_delta() {
        assert_eq!(Direction::from_delta(IVec2::new(5, 0)), Some(Direction::Right));
        assert_eq!(Direction::from_delta(IVec2::new(0, -3)), Some(Direction::Up));
        assert_eq!(Direction::from_delta(IVec2::ZERO), None);
        assert_eq!(Direction::from_delta(IVec2::new(1, 1)), None);
    }

    #[test]
    fn test_as_ref_str() {
        assert_eq!(Direction::Up.as_ref(), "up");
        assert_eq!(Direction::Right.as_ref(), "right");
    }
}
