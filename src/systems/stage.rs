//! Session lifecycle: the game clock, stage transitions, spawning and reset.

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::system::{Res, ResMut};
use bevy_ecs::world::World;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::map::builder::TileMap;
use crate::map::coords::CoordinateMapper;
use crate::map::parser::MapLayout;
use crate::systems::components::{
    Adversary, AdversaryBundle, DeltaTime, DesiredDirection, GameClock, GameStage, GhostMode, Motion, PlayerAnimation,
    PlayerBundle, PlayerControlled, ResetRequest, ScoreResource,
};

/// Leaves the menu as soon as the player asks for a direction.
pub fn stage_system(desired: Res<DesiredDirection>, mut stage: ResMut<GameStage>) {
    if *stage == GameStage::Menu && desired.0.is_some() {
        debug!(direction = ?desired.0, "Leaving menu on first input");
        *stage = GameStage::Active;
    }
}

/// Advances elapsed game time. This is also the phase timer behind the mode schedule.
pub fn clock_system(delta_time: Res<DeltaTime>, mut clock: ResMut<GameClock>) {
    clock.elapsed += delta_time.0;
}

/// Declares the game won once every pellet and power pellet has been eaten.
pub fn win_system(map: Res<TileMap>, clock: Res<GameClock>, mut stage: ResMut<GameStage>) {
    if *stage == GameStage::Active && map.remaining_pellets() == 0 {
        info!(elapsed = clock.elapsed, "All pellets eaten");
        *stage = GameStage::Win;
    }
}

/// Spawns the player and every adversary at their layout positions.
pub fn spawn_agents(world: &mut World) {
    let Some(layout) = world.get_resource::<MapLayout>().cloned() else {
        warn!("No map layout to spawn agents from");
        return;
    };
    let config = world.get_resource::<SimulationConfig>().copied().unwrap_or_default();
    let mapper = world
        .get_resource::<CoordinateMapper>()
        .copied()
        .unwrap_or_else(|| config.mapper());

    let start = layout.player_start;
    world.spawn(PlayerBundle {
        player: PlayerControlled,
        motion: Motion::at_rest(mapper.tile_to_world(start), start, config.player_speed),
        animation: PlayerAnimation::default(),
    });

    for (slot, (kind, tile)) in layout.adversaries.iter().copied().enumerate() {
        let house = mapper.tile_to_world(tile);
        world.spawn(AdversaryBundle {
            adversary: Adversary {
                kind,
                mode: GhostMode::Scatter,
                scatter_corner: kind.scatter_corner(layout.width, layout.height),
                house,
                frightened_until: 0.0,
                slot,
            },
            motion: Motion::at_rest(house, tile, config.adversary_speed),
        });
    }

    debug!(adversaries = layout.adversaries.len(), "Spawned agents");
}

/// Restores the session to its initial state: fresh map, zero score, agents at spawn and
/// the stage back on the menu.
pub fn reset_world(world: &mut World) {
    let Some(layout) = world.get_resource::<MapLayout>().cloned() else {
        warn!("No map layout to reset from");
        return;
    };

    world.insert_resource(TileMap::from_layout(&layout));
    world.insert_resource(ScoreResource(0));
    world.insert_resource(GameClock::default());
    world.insert_resource(DesiredDirection::default());
    world.insert_resource(GameStage::Menu);
    world.insert_resource(ResetRequest(false));

    let mut agents = world.query_filtered::<Entity, With<Motion>>();
    let agents: Vec<Entity> = agents.iter(world).collect();
    for entity in agents {
        world.despawn(entity);
    }

    spawn_agents(world);
    info!("Session reset");
}

/// Performs a requested reset before anything else moves this tick.
pub fn reset_system(world: &mut World) {
    reset_world(world);
}
