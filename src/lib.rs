//! Othello against an LLM-backed opponent.
//!
//! The rules live in [`strictly_othello`]; this crate adds the automated
//! opponent and the surfaces around it.
//!
//! # Architecture
//!
//! - **Oracle**: suggests moves ([`LlmOracle`] over OpenAI, Anthropic or
//!   Gemini, or the offline [`FallbackOracle`])
//! - **Controller**: runs the match, schedules oracle requests and throws
//!   away replies that arrive after the position changed
//! - **TUI / autoplay**: interactive terminal play and headless matches
//!
//! # Example
//!
//! ```no_run
//! use othello_ai::{run_autoplay, AppConfig, FallbackOracle, MatchSettings};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load_or_default("othello.toml")?;
//! let report = run_autoplay(Arc::new(FallbackOracle), MatchSettings::autoplay(&config), false).await;
//! println!("{} ({})", report.outcome, report.score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod autoplay;
mod config;
mod controller;
mod llm_client;
mod oracle;
mod tui;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, MatchConfig, OracleConfig};

// Crate-level exports - LLM client
pub use llm_client::{gemini_schema, LlmClient, LlmConfig, LlmError, LlmProvider, ReplySchema};

// Crate-level exports - Oracles
pub use oracle::{
    from_config as oracle_from_config, parse_reply, FallbackOracle, LlmOracle, MoveOracle,
    OracleError, OracleErrorKind, SuggestedMove,
};

// Crate-level exports - Match control
pub use controller::{MatchController, MatchEvent, MatchSettings};

// Crate-level exports - Surfaces
pub use autoplay::{run_autoplay, AutoplayReport};
pub use tui::run_tui;
