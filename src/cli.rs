//! Command-line interface for othello_ai.

use clap::{Parser, Subcommand, ValueEnum};
use strictly_othello::Player;

/// Strictly Othello - play Othello against an LLM opponent
#[derive(Parser, Debug)]
#[command(name = "othello_ai")]
#[command(about = "Othello with an LLM-backed opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults are used if it is missing)
    #[arg(short, long, default_value = "othello.toml", global = true)]
    pub config: std::path::PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Two humans at one keyboard, no AI opponent
        #[arg(long)]
        hotseat: bool,

        /// Side the AI plays
        #[arg(long, value_enum)]
        ai_side: Option<Side>,

        /// Hide legal-move hints
        #[arg(long)]
        no_hints: bool,

        /// Never call an LLM; use the corner-first fallback opponent
        #[arg(long)]
        offline: bool,
    },

    /// Let the AI play both sides and print the game
    Autoplay {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: usize,

        /// Never call an LLM; use the corner-first fallback opponent
        #[arg(long)]
        offline: bool,

        /// Print only the final result of each game
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Side selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Black (moves first)
    Black,
    /// White
    White,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Player::Black,
            Side::White => Player::White,
        }
    }
}

/// Where a command sends its log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// A log file, so the TUI owns the terminal
    File,
    /// Standard error, at `warn` unless `RUST_LOG` says otherwise
    Stderr,
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            hotseat: false,
            ai_side: None,
            no_hints: false,
            offline: false,
        }
    }
}

impl Command {
    /// Log destination for this command.
    pub fn log_target(&self) -> LogTarget {
        match self {
            Command::Play { .. } => LogTarget::File,
            Command::Autoplay { .. } => LogTarget::Stderr,
        }
    }
}
