//! This module contains the session orchestrator: the ECS world and the per-tick schedule.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::{IVec2, Vec2};
use tracing::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::constants::RAW_BOARD;
use crate::error::GameResult;
use crate::formatter;
use crate::map::builder::TileMap;
use crate::map::direction::Direction;
use crate::map::parser::{MapLayout, MapTileParser};
use crate::systems::{
    adversary_movement_system, audio_system, capture_system, clock_system, mode_system, player_animation_system,
    player_movement_system, reset_system, reset_world, spawn_agents, stage_system, win_system, Adversary,
    AdversaryKind, AudioEvent, AudioResource, AudioSink, AudioState, DeltaTime, DesiredDirection, GameClock,
    GameStage, GhostMode, Motion, PlayerAnimation, PlayerControlled, ResetRequest, ScoreResource, SimulationRng,
};

/// The phases of a tick, in execution order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum SimulationSet {
    /// Menu and stage transitions driven by input
    Stage,
    /// Game time
    Clock,
    /// Adversary mode transitions
    Modes,
    /// Captures, and the reset they may trigger
    Collision,
    /// Player and adversary movement
    Motion,
    /// Win detection and audio dispatch
    Respond,
}

/// What a renderer needs to draw the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub tile: IVec2,
    pub direction: Option<Direction>,
    pub facing: Option<Direction>,
    pub frame: u8,
}

/// What a renderer needs to draw one adversary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdversaryView {
    pub kind: AdversaryKind,
    pub mode: GhostMode,
    pub position: Vec2,
    pub tile: IVec2,
    pub direction: Option<Direction>,
}

/// A read-only copy of the drawable session state after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub stage: GameStage,
    pub score: u32,
    pub elapsed: f32,
    pub player: Option<PlayerView>,
    /// In roster order.
    pub adversaries: Vec<AdversaryView>,
}

/// Core simulation state built on the Bevy ECS architecture.
///
/// The `World` holds the map, the agents and every shared resource; the `Schedule` runs
/// the systems of one tick in a fixed order on a single thread.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a session on the default board with the default configuration.
    pub fn new() -> GameResult<Game> {
        Self::with_layout(&RAW_BOARD, SimulationConfig::default())
    }

    /// Creates a session from a layout and configuration.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the configuration is invalid or the layout fails to parse.
    pub fn with_layout(rows: &[&str], config: SimulationConfig) -> GameResult<Game> {
        info!("Starting simulation initialization");
        config.validate()?;
        let layout = MapTileParser::parse_layout(rows)?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, layout, config);
        spawn_agents(&mut world);
        Self::configure_schedule(&mut schedule);

        info!(seed = config.seed, "Simulation initialized");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<AudioEvent>(world);
    }

    fn insert_resources(world: &mut World, layout: MapLayout, config: SimulationConfig) {
        world.insert_resource(TileMap::from_layout(&layout));
        world.insert_resource(layout);
        world.insert_resource(config.mapper());
        world.insert_resource(SimulationRng::from_seed(config.seed));
        world.insert_resource(config);
        world.insert_resource(ScoreResource(0));
        world.insert_resource(DeltaTime::default());
        world.insert_resource(GameClock::default());
        world.insert_resource(DesiredDirection::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(ResetRequest::default());
        world.insert_resource(AudioState::default());
        world.insert_non_send_resource(AudioResource::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let is_active = |stage: Res<GameStage>| *stage == GameStage::Active;

        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule
            .add_systems((
                stage_system.in_set(SimulationSet::Stage),
                clock_system.in_set(SimulationSet::Clock),
                mode_system.in_set(SimulationSet::Modes),
                (capture_system, reset_system.run_if(|reset: Res<ResetRequest>| reset.0))
                    .chain()
                    .in_set(SimulationSet::Collision),
                (player_movement_system, player_animation_system, adversary_movement_system)
                    .chain()
                    .in_set(SimulationSet::Motion),
                (win_system, audio_system).chain().in_set(SimulationSet::Respond),
            ))
            .configure_sets(
                (
                    SimulationSet::Stage,
                    SimulationSet::Clock.run_if(is_active),
                    SimulationSet::Modes.run_if(is_active),
                    SimulationSet::Collision.run_if(is_active),
                    // Evaluated after a reset in Collision may have returned the stage to the menu
                    SimulationSet::Motion.run_if(is_active),
                    SimulationSet::Respond,
                )
                    .chain(),
            );
    }

    /// Advances the simulation by one frame.
    ///
    /// A `Some` input overwrites the latched desired direction; `None` keeps whatever is
    /// pending. The delta is clamped according to [`SimulationConfig::max_delta_time`].
    pub fn tick(&mut self, dt: f32, input: Option<Direction>) {
        let config = self.world.get_resource::<SimulationConfig>().copied().unwrap_or_default();
        let dt = config.clamp_delta(dt);

        if let Some(direction) = input {
            trace!(direction = direction.as_ref(), "Input latched");
            self.world.insert_resource(DesiredDirection(Some(direction)));
        }
        self.world.insert_resource(DeltaTime(dt));

        self.schedule.run(&mut self.world);

        if let Some(mut events) = self.world.get_resource_mut::<Events<AudioEvent>>() {
            events.update();
        }
        formatter::increment_tick();
    }

    /// Leaves the menu without waiting for input.
    pub fn start(&mut self) {
        if let Some(mut stage) = self.world.get_resource_mut::<GameStage>() {
            if *stage == GameStage::Menu {
                debug!("Starting session");
                *stage = GameStage::Active;
            }
        }
    }

    /// Restores the map, score, clock and agent positions, and returns to the menu.
    pub fn reset(&mut self) {
        reset_world(&mut self.world);
    }

    /// Installs the sink that receives audio triggers.
    pub fn set_audio_sink(&mut self, sink: impl AudioSink + 'static) {
        self.world.insert_non_send_resource(AudioResource(Box::new(sink)));
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.world.insert_resource(AudioState { muted });
    }

    /// The current map, for drawing cells.
    pub fn map(&self) -> Option<&TileMap> {
        self.world.get_resource::<TileMap>()
    }

    pub fn stage(&self) -> GameStage {
        self.world.get_resource::<GameStage>().copied().unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.world.get_resource::<ScoreResource>().map_or(0, |score| score.0)
    }

    /// Copies out everything a renderer draws.
    pub fn snapshot(&mut self) -> Snapshot {
        let player = self
            .world
            .query_filtered::<(&Motion, &PlayerAnimation), With<PlayerControlled>>()
            .single(&self.world)
            .ok()
            .map(|(motion, animation)| PlayerView {
                position: motion.position,
                tile: motion.tile,
                direction: motion.direction,
                facing: motion.facing,
                frame: animation.frame,
            });

        let mut adversaries: Vec<(usize, AdversaryView)> = self
            .world
            .query::<(&Adversary, &Motion)>()
            .iter(&self.world)
            .map(|(adversary, motion)| {
                let view = AdversaryView {
                    kind: adversary.kind,
                    mode: adversary.mode,
                    position: motion.position,
                    tile: motion.tile,
                    direction: motion.direction,
                };
                (adversary.slot, view)
            })
            .collect();
        adversaries.sort_by_key(|(slot, _)| *slot);

        Snapshot {
            stage: self.stage(),
            score: self.score(),
            elapsed: self.world.get_resource::<GameClock>().map_or(0.0, |clock| clock.elapsed),
            player,
            adversaries: adversaries.into_iter().map(|(_, view)| view).collect(),
        }
    }
}
