use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, warn};

use crate::map::coords::CoordinateMapper;
use crate::systems::components::{Adversary, GhostMode, Motion, PlayerControlled, ResetRequest};

/// Resolves player/adversary tile coincidence.
///
/// A frightened adversary on the player's tile is eaten. A scattering or chasing one catches
/// the player and requests a session reset. Eaten adversaries pass through harmlessly.
pub fn capture_system(
    mapper: Res<CoordinateMapper>,
    mut reset: ResMut<ResetRequest>,
    players: Query<&Motion, With<PlayerControlled>>,
    mut adversaries: Query<(&mut Adversary, &mut Motion), Without<PlayerControlled>>,
) {
    let player_tile = match players.single() {
        Ok(player) => mapper.world_to_tile(player.position),
        Err(error) => {
            warn!(%error, "No single player to check for captures");
            return;
        }
    };

    for (mut adversary, mut motion) in adversaries.iter_mut() {
        if mapper.world_to_tile(motion.position) != player_tile {
            continue;
        }

        match adversary.mode {
            GhostMode::Frightened => adversary.get_eaten(&mut motion),
            GhostMode::Scatter | GhostMode::Chase => {
                debug!(kind = adversary.kind.as_ref(), tile = %player_tile, "Player caught");
                reset.0 = true;
            }
            GhostMode::Eaten => {}
        }
    }
}
