use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{trace, warn};

use crate::config::SimulationConfig;
use crate::constants::MapTile;
use crate::map::builder::TileMap;
use crate::map::coords::CoordinateMapper;
use crate::systems::audio::AudioEvent;
use crate::systems::components::{
    Adversary, DeltaTime, DesiredDirection, GameClock, Motion, PlayerAnimation, PlayerControlled, ScoreResource, Traveler,
};
use crate::systems::movement::{advance, can_traverse, check_alignment, snap_to_tile};

/// Moves the player one tick.
///
/// On a tile center the player snaps into place, eats whatever the tile holds and commits a
/// pending turn if the tile in that direction is open. A turn that cannot be taken yet stays
/// latched for later ticks.
#[allow(clippy::too_many_arguments)]
pub fn player_movement_system(
    mut map: ResMut<TileMap>,
    mapper: Res<CoordinateMapper>,
    delta_time: Res<DeltaTime>,
    clock: Res<GameClock>,
    config: Res<SimulationConfig>,
    mut score: ResMut<ScoreResource>,
    mut desired: ResMut<DesiredDirection>,
    mut players: Query<&mut Motion, With<PlayerControlled>>,
    mut adversaries: Query<(&mut Adversary, &mut Motion), Without<PlayerControlled>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    let mut player = match players.single_mut() {
        Ok(player) => player,
        Err(error) => {
            warn!(%error, "No single player to move");
            return;
        }
    };

    let aligned = check_alignment(&mut player, delta_time.0, &mapper);
    if aligned {
        snap_to_tile(&mut player, &mapper);
        let tile = player.tile;

        let eaten = map.consume(tile);
        if let Some(points) = eaten.score_value() {
            score.0 += points;
            trace!(?eaten, points, score = score.0, "Consumed tile");
        }
        match eaten {
            MapTile::Pellet => {
                audio_events.write(AudioEvent::Chomp);
            }
            MapTile::PowerPellet => {
                audio_events.write(AudioEvent::PowerPellet);
                let until = clock.elapsed + config.frightened_duration;
                for (mut adversary, mut motion) in adversaries.iter_mut() {
                    adversary.frighten(&mut motion, until);
                }
            }
            MapTile::Bonus => {
                audio_events.write(AudioEvent::BonusEaten);
            }
            _ => {}
        }

        if let Some(wanted) = desired.0 {
            if can_traverse(&map, Traveler::Player, tile + wanted.as_ivec2()) {
                trace!(direction = wanted.as_ref(), %tile, "Committed desired direction");
                player.set_direction(Some(wanted));
                desired.0 = None;
            }
        }
    }

    advance(&mut player, delta_time.0, aligned, &mapper, |tile| {
        can_traverse(&map, Traveler::Player, tile)
    });
}

/// Advances the player's animation frame while it is moving.
pub fn player_animation_system(
    delta_time: Res<DeltaTime>,
    mut players: Query<(&Motion, &mut PlayerAnimation), With<PlayerControlled>>,
) {
    for (motion, mut animation) in players.iter_mut() {
        animation.tick(delta_time.0, motion.direction.is_some());
    }
}
