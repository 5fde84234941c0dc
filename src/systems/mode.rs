//! Adversary mode state machine: the global scatter/chase schedule plus the per-adversary
//! frightened and eaten overrides.

use bevy_ecs::system::{Query, Res};
use tracing::debug;

use crate::systems::components::{Adversary, GameClock, GhostMode, Motion};

/// Scatter/chase phase boundaries, in seconds of game time.
///
/// Even phases scatter and odd phases chase; after the last boundary the chase is permanent.
pub const MODE_SCHEDULE: [f32; 5] = [7.0, 27.0, 34.0, 54.0, 59.0];

/// The mode the global schedule dictates at `elapsed` seconds.
pub fn scheduled_mode(elapsed: f32) -> GhostMode {
    let phase = MODE_SCHEDULE.iter().take_while(|&&boundary| elapsed >= boundary).count();
    if phase % 2 == 0 {
        GhostMode::Scatter
    } else {
        GhostMode::Chase
    }
}

impl Adversary {
    /// Advances this adversary's mode for the current tick.
    ///
    /// Frightened holds until its expiry, then doubles the speed back. Eaten holds until the
    /// adversary stands exactly on its house position. Everything else follows the schedule.
    pub fn update_mode(&mut self, motion: &mut Motion, now: f32, scheduled: GhostMode) {
        let next = match self.mode {
            GhostMode::Frightened if now >= self.frightened_until => {
                motion.speed *= 2.0;
                scheduled
            }
            GhostMode::Frightened => return,
            GhostMode::Eaten if motion.position == self.house => scheduled,
            GhostMode::Eaten => return,
            _ => scheduled,
        };

        if next != self.mode {
            debug!(kind = self.kind.as_ref(), from = self.mode.as_ref(), to = next.as_ref(), "Adversary mode changed");
            self.mode = next;
        }
    }

    /// Frightens this adversary until `until`.
    ///
    /// Speed is halved on entry only, so a second power pellet just extends the expiry.
    /// Eaten adversaries are unaffected.
    pub fn frighten(&mut self, motion: &mut Motion, until: f32) {
        match self.mode {
            GhostMode::Eaten => {}
            GhostMode::Frightened => self.frightened_until = until,
            GhostMode::Scatter | GhostMode::Chase => {
                debug!(kind = self.kind.as_ref(), until, "Adversary frightened");
                self.mode = GhostMode::Frightened;
                self.frightened_until = until;
                motion.speed *= 0.5;
            }
        }
    }

    /// Marks this adversary as eaten, restoring the speed it lost while frightened.
    pub fn get_eaten(&mut self, motion: &mut Motion) {
        if self.mode == GhostMode::Frightened {
            debug!(kind = self.kind.as_ref(), "Adversary eaten");
            self.mode = GhostMode::Eaten;
            motion.speed *= 2.0;
        }
    }
}

/// Moves every adversary through its mode transitions for this tick.
pub fn mode_system(clock: Res<GameClock>, mut adversaries: Query<(&mut Adversary, &mut Motion)>) {
    let scheduled = scheduled_mode(clock.elapsed);
    for (mut adversary, mut motion) in adversaries.iter_mut() {
        adversary.update_mode(&mut motion, clock.elapsed, scheduled);
    }
}
