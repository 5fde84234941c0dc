//! Tracing subscriber setup for the headless runner.

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{GameError, GameResult};
use crate::formatter::TickFormatter;

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides `default_filter`. Fails if a global subscriber is already set.
pub fn setup_logging(default_filter: &str) -> GameResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(true).event_format(TickFormatter))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::Logging(format!("Failed to set tracing subscriber: {e}")))
}
