//! PopOut console game.

use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod input;
mod session;

use config::SessionConfig;
use popout_core::GameState;
use session::Session;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the game board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = SessionConfig::from_env()?;
    info!(rows = config.rows, cols = config.cols, "Starting PopOut session");

    let game = GameState::new(config.rows, config.cols)?;
    let outcome = Session::new(game, io::stdin().lock(), io::stdout().lock()).run()?;

    info!(?outcome, "Session finished");
    Ok(())
}
