//! Centralized error types for the simulation.
//!
//! Only setup can fail. Everything that happens inside a tick
//! (blocked movement, unreachable targets, timers not yet expired) is an
//! expected outcome and is expressed as data instead.

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Error type for map layout parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Layout has no rows")]
    EmptyLayout,

    #[error("Unknown character {character:?} at ({x}, {y})")]
    UnknownCharacter { character: char, x: usize, y: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Border cell ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },

    #[error("Layout has no player spawn")]
    MissingPlayerSpawn,

    #[error("Layout has more than one player spawn, second at ({x}, {y})")]
    DuplicatePlayerSpawn { x: usize, y: usize },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
