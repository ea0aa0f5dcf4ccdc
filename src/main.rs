//! Strictly Othello - Unified CLI
//!
//! Terminal play and headless matches against an LLM opponent.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, LogTarget};
use othello_ai::{
    oracle_from_config, run_autoplay, run_tui, AppConfig, FallbackOracle, MatchSettings,
    MoveOracle,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    // Must run before the config load
    init_tracing(command.log_target())?;
    let mut config = AppConfig::load_or_default(&cli.config)?;

    match command {
        Command::Play {
            hotseat,
            ai_side,
            no_hints,
            offline,
        } => {
            if hotseat {
                config.game_mut().set_vs_ai(false);
            }
            if let Some(side) = ai_side {
                config.game_mut().set_automated_side(side.into());
            }
            if no_hints {
                config.game_mut().set_show_hints(false);
            }
            run_play(config, offline).await
        }
        Command::Autoplay {
            games,
            offline,
            quiet,
        } => run_autoplay_games(config, games, offline, quiet).await,
    }
}

fn init_tracing(target: LogTarget) -> Result<()> {
    match target {
        LogTarget::File => {
            // Log to a file so output does not interfere with the TUI
            let log_file = std::fs::File::create("othello_ai.log")?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .try_init();
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}

/// Run the interactive terminal match
async fn run_play(config: AppConfig, offline: bool) -> Result<()> {
    info!(?config, "Starting interactive match");

    let oracle = build_oracle(&config, offline);
    run_tui(
        oracle,
        MatchSettings::from_config(&config),
        *config.game().show_hints(),
    )
    .await
}

/// Run headless matches with the AI on both sides
async fn run_autoplay_games(
    config: AppConfig,
    games: usize,
    offline: bool,
    quiet: bool,
) -> Result<()> {
    let oracle = build_oracle(&config, offline);
    let settings = MatchSettings::autoplay(&config);

    for game in 1..=games {
        let report = run_autoplay(Arc::clone(&oracle), settings, !quiet).await;
        println!(
            "Game {}: {} ({}) after {} moves, {} fallbacks",
            game, report.outcome, report.score, report.moves, report.fallbacks
        );
    }

    Ok(())
}

fn build_oracle(config: &AppConfig, offline: bool) -> Arc<dyn MoveOracle> {
    if offline {
        info!("Offline mode, using fallback oracle");
        Arc::new(FallbackOracle)
    } else {
        oracle_from_config(config.oracle())
    }
}
