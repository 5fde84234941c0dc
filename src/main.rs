use std::env;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result};
use mazechase::config::SimulationConfig;
use mazechase::constants::{DEFAULT_SEED, LOOP_TIME, RAW_BOARD};
use mazechase::game::Game;
use mazechase::logging::setup_logging;
use mazechase::map::direction::Direction;
use mazechase::systems::GameStage;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use thousands::Separable;
use tracing::info;

/// Simulated seconds to run when `MAZECHASE_SECONDS` is unset.
const DEFAULT_SECONDS: f32 = 120.0;

/// The autopilot picks a new direction this often, in ticks.
const AUTOPILOT_INTERVAL: u64 = 20;

/// Reads and parses an environment variable, `None` if it is unset.
fn env_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {value:?}")),
        Err(_) => Ok(None),
    }
}

/// Runs the simulation headless, with a random autopilot standing in for the player.
///
/// `MAZECHASE_SEED` seeds both the simulation and the autopilot, `MAZECHASE_SECONDS` sets
/// how long to run and `MAZECHASE_REALTIME=1` paces ticks at the real frame rate.
pub fn main() -> Result<()> {
    setup_logging("info")?;

    let seed = env_var::<u64>("MAZECHASE_SEED")?.unwrap_or(DEFAULT_SEED);
    let seconds = env_var::<f32>("MAZECHASE_SECONDS")?.unwrap_or(DEFAULT_SECONDS);
    let realtime = env_var::<u8>("MAZECHASE_REALTIME")?.is_some_and(|flag| flag != 0);

    let config = SimulationConfig::default().with_seed(seed);
    let mut game = Game::with_layout(&RAW_BOARD, config).context("Could not create game")?;
    let mut autopilot = SmallRng::seed_from_u64(seed.rotate_left(32));

    let dt = LOOP_TIME.as_secs_f32();
    let total_ticks = (seconds.max(0.0) / dt).ceil() as u64;
    let ticks_per_second = (1.0 / dt).round() as u64;

    info!(seed, seconds, realtime, loop_time = ?LOOP_TIME, "Starting simulation loop");

    for tick in 0..total_ticks {
        let start = Instant::now();

        let input = if tick % AUTOPILOT_INTERVAL == 0 {
            Direction::DIRECTIONS.choose(&mut autopilot).copied()
        } else {
            None
        };
        game.tick(dt, input);

        if tick % ticks_per_second == 0 {
            let snapshot = game.snapshot();
            info!(
                second = tick / ticks_per_second,
                score = %snapshot.score.separate_with_commas(),
                stage = snapshot.stage.as_ref(),
                pellets = game.map().map_or(0, |map| map.remaining_pellets()),
                "Progress"
            );
        }

        if game.stage() == GameStage::Win {
            info!(tick, "Board cleared");
            break;
        }

        if realtime {
            if let Some(remaining) = LOOP_TIME.checked_sub(start.elapsed()) {
                spin_sleep::sleep(remaining);
            }
        }
    }

    info!(
        score = %game.score().separate_with_commas(),
        stage = game.stage().as_ref(),
        "Simulation finished"
    );
    Ok(())
}
