//! Headless arena client: plays a seeded match with a scripted player and
//! prints the combat log.
mod autopilot;
mod config;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use arena_content::{CatalogLoader, ContentFactory, ContentLibrary};
use arena_core::{GameConfig, GameError};
use arena_runtime::{FileSlotStorage, Session, TracingAnimations};
use config::CliConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let (game_config, library) = load_content(&config)?;
    let mut builder = Session::builder()
        .config(game_config)
        .content(Arc::new(library))
        .animations(Arc::new(TracingAnimations));
    if let Some(path) = &config.save_path {
        builder = builder.storage(FileSlotStorage::new(path)?);
    }
    let mut session = builder.build()?;

    if config.save_path.is_some() && session.load()? {
        println!("Resumed saved match.");
    } else {
        session.new_game(&config.map, config.seed)?;
        println!("New match on '{}' with seed {}.", config.map, config.seed);
    }

    play(&mut session, config.turns)?;
    let state = session.state().context("session has no match")?;
    for row in render::map_rows(state) {
        println!("{row}");
    }
    println!("{}", render::status_line(state));

    if config.save_path.is_some() && !session.is_player_dead() {
        session.save()?;
        println!("Match saved.");
    }
    Ok(())
}

/// Plays up to `turns` player commands, echoing the combat log as it grows.
fn play(session: &mut Session, turns: u32) -> Result<()> {
    let mut printed = 0;
    print_new_lines(session, &mut printed)?;

    for turn in 0..turns {
        if session.is_player_dead() {
            println!("The hero has fallen.");
            break;
        }
        let state = session.state().context("session has no match")?;
        let action = autopilot::choose(&session.engine(), state);

        let outcome = session.act(action).map(|_| ());
        if let Err(e) = outcome {
            if !e.is_invalid_operation() {
                return Err(e.into());
            }
            tracing::warn!(turn, error = %e, code = e.error_code(), "command rejected, waiting");
            session.wait()?;
        }

        print_new_lines(session, &mut printed)?;
    }
    Ok(())
}

fn print_new_lines(session: &Session, printed: &mut usize) -> Result<()> {
    let log = &session.state().context("session has no match")?.log_entries;
    for line in log.iter().skip(*printed) {
        println!("{line}");
    }
    *printed = log.len();
    Ok(())
}

fn load_content(config: &CliConfig) -> Result<(GameConfig, ContentLibrary)> {
    match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            Ok((factory.load_config()?, factory.load_library()?))
        }
        None => Ok((GameConfig::default(), CatalogLoader::builtin()?)),
    }
}

/// Logs to stderr, and to `arena.log` under `ARENA_LOG_DIR` when set.
///
/// The returned guard must stay alive for the file writer to flush.
fn setup_logging(config: &CliConfig) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "arena.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!(seed = config.seed, map = %config.map, turns = config.turns, "logging initialized");
    Ok(guard)
}
