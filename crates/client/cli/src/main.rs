//! Headless host loop for the tag-team roster controller.
mod config;
mod console;
mod session;

use anyhow::{Context, Result};
use config::SimConfig;
use session::SimSession;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging();

    tracing::info!(
        "Starting session: character={}, lives={}, tick={}ms",
        config.starting_character,
        config.starting_lives,
        config.tick_ms
    );

    let mut session = SimSession::new(config)?;
    session.run()?;

    let snapshot =
        serde_json::to_string_pretty(session.roster()).context("failed to serialize roster")?;
    println!("{}", snapshot);
    Ok(())
}

/// Logs to stderr through a non-blocking writer; stdout carries the roster snapshot.
fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();

    guard
}
