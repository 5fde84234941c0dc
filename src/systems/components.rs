use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::{IVec2, Vec2};
use rand::{rngs::SmallRng, SeedableRng};
use strum_macros::{AsRefStr, EnumIter};

use crate::constants::{self, TraversalFlags};
use crate::map::direction::Direction;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// The four adversary personalities. Each one picks its chase target differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AdversaryKind {
    /// Targets the player's tile directly.
    Pursuer,
    /// Targets a few tiles ahead of the player.
    Ambusher,
    /// Reflects a point ahead of the player through the pursuer.
    Flanker,
    /// Pursues from afar, retreats to its corner when close.
    Opportunist,
}

impl AdversaryKind {
    /// The layout symbol marking this kind's spawn cell.
    pub const fn spawn_symbol(self) -> char {
        match self {
            AdversaryKind::Pursuer => 'R',
            AdversaryKind::Ambusher => 'K',
            AdversaryKind::Flanker => 'C',
            AdversaryKind::Opportunist => 'O',
        }
    }

    pub const fn as_usize(self) -> usize {
        match self {
            AdversaryKind::Pursuer => 0,
            AdversaryKind::Ambusher => 1,
            AdversaryKind::Flanker => 2,
            AdversaryKind::Opportunist => 3,
        }
    }

    /// The scatter corner for this kind on a map of the given size, in tiles.
    ///
    /// Corners sit one tile inside the border so they are never walls on a bordered map.
    pub fn scatter_corner(self, width: usize, height: usize) -> IVec2 {
        let right = width as i32 - 2;
        let bottom = height as i32 - 2;
        match self {
            AdversaryKind::Pursuer => IVec2::new(right, 1),
            AdversaryKind::Ambusher => IVec2::new(1, 1),
            AdversaryKind::Flanker => IVec2::new(right, bottom),
            AdversaryKind::Opportunist => IVec2::new(1, bottom),
        }
    }
}

/// The behavioral mode of an adversary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostMode {
    /// Head for the fixed scatter corner.
    Scatter,
    /// Head for the kind-specific chase target.
    Chase,
    /// Wander randomly at half speed; can be eaten.
    Frightened,
    /// Return to the house after being eaten.
    Eaten,
}

/// Continuous kinematic state shared by the player and the adversaries.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// World-space position.
    pub position: Vec2,
    /// Current travel direction, `None` when stopped.
    pub direction: Option<Direction>,
    /// Last direction travelled, kept while stopped. `None` until the agent first moves.
    pub facing: Option<Direction>,
    /// Displacement applied during the last tick.
    pub velocity: Vec2,
    /// Speed, in world units per second.
    pub speed: f32,
    /// Cached tile the agent occupies.
    pub tile: IVec2,
}

impl Motion {
    /// A stationary agent centered on `tile`.
    pub fn at_rest(position: Vec2, tile: IVec2, speed: f32) -> Self {
        Self {
            position,
            direction: None,
            facing: None,
            velocity: Vec2::ZERO,
            speed,
            tile,
        }
    }

    /// Sets the travel direction, keeping `facing` in sync.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        if direction.is_some() {
            self.facing = direction;
        }
        self.direction = direction;
    }

    /// Stops the agent in place.
    pub fn stop(&mut self) {
        self.direction = None;
        self.velocity = Vec2::ZERO;
    }
}

/// Which class of agent is moving, used to select the tiles it may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traveler {
    Player,
    Adversary,
}

impl Traveler {
    pub fn traversal_flags(self) -> TraversalFlags {
        match self {
            Traveler::Player => TraversalFlags::PLAYER,
            Traveler::Adversary => TraversalFlags::ADVERSARY,
        }
    }
}

/// Player sprite animation state.
///
/// The frame index is owned by the player entity rather than hidden in the animation code.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAnimation {
    /// Index of the current frame, `0..PLAYER_FRAME_COUNT`.
    pub frame: u8,
    /// Seconds of movement accumulated since the last frame change.
    pub elapsed: f32,
}

impl PlayerAnimation {
    /// Advances the animation by `dt` seconds. Only movement advances the cycle.
    pub fn tick(&mut self, dt: f32, moving: bool) {
        if !moving {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= constants::animation::PLAYER_FRAME_TIME {
            self.frame = (self.frame + 1) % constants::animation::PLAYER_FRAME_COUNT;
            self.elapsed = 0.0;
        }
    }
}

/// Per-adversary state: personality, mode and the fixed tiles it navigates toward.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Adversary {
    pub kind: AdversaryKind,
    pub mode: GhostMode,
    /// Fixed target while scattering.
    pub scatter_corner: IVec2,
    /// Spawn position, and where an eaten adversary returns to.
    pub house: Vec2,
    /// Game time at which frightened mode ends.
    pub frightened_until: f32,
    /// Position in the roster; lower slots are processed first.
    pub slot: usize,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub motion: Motion,
    pub animation: PlayerAnimation,
}

#[derive(Bundle)]
pub struct AdversaryBundle {
    pub adversary: Adversary,
    pub motion: Motion,
}

/// The coarse state of the session.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum GameStage {
    /// Waiting for the first input; nothing moves.
    #[default]
    Menu,
    /// The simulation is running.
    Active,
    /// Every pellet has been eaten.
    Win,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Frame delta for the current tick, in seconds.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f32);

/// Seconds of active play since the session started. Drives the mode schedule.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct GameClock {
    pub elapsed: f32,
}

/// The player's latched turn intent, kept until it can be committed.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DesiredDirection(pub Option<Direction>);

/// Set when the player has been caught; the session is reset before anything else moves.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetRequest(pub bool);

/// Random source for frightened wandering.
#[derive(Resource, Debug, Clone)]
pub struct SimulationRng(pub SmallRng);

impl SimulationRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
