//! Audio event dispatch.
//!
//! The simulation only emits fire-and-forget triggers. Playback belongs to whatever
//! [`AudioSink`] the host installs; without one, triggers are logged and dropped.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{NonSendMut, Res},
};
use tracing::trace;

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Start or restart the chomp loop
    Chomp,
    /// One-shot fanfare for a bonus item
    BonusEaten,
    /// One-shot cue for a power pellet
    PowerPellet,
}

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Receives audio triggers from the simulation.
pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}

/// A sink that plays nothing. Stands in when no audio device is available.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, event: AudioEvent) {
        trace!(?event, "Audio event dropped by silent sink");
    }
}

/// Non-send resource holding the installed sink.
///
/// Sinks usually wrap device handles that must stay on the main thread, so this is never
/// shared with other threads.
pub struct AudioResource(pub Box<dyn AudioSink>);

impl Default for AudioResource {
    fn default() -> Self {
        Self(Box::new(SilentSink))
    }
}

/// System that forwards audio events to the installed sink
pub fn audio_system(mut audio: NonSendMut<AudioResource>, state: Res<AudioState>, mut events: EventReader<AudioEvent>) {
    for event in events.read() {
        if state.muted {
            trace!(?event, "Skipping sound while muted");
            continue;
        }
        audio.0.play(*event);
    }
}
