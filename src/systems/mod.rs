//! The bevy_ecs systems, components and resources that make up the simulation.

pub mod audio;
pub mod collision;
pub mod components;
pub mod ghost;
pub mod mode;
pub mod movement;
pub mod pathfinding;
pub mod player;
pub mod stage;
pub mod targeting;

pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::ghost::*;
pub use self::mode::*;
pub use self::movement::*;
pub use self::pathfinding::*;
pub use self::player::*;
pub use self::stage::*;
pub use self::targeting::*;
