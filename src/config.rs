//! Application configuration loaded from TOML.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_othello::Player;
use tracing::{debug, info, instrument};

/// Top-level configuration file.
///
/// ```toml
/// [oracle]
/// provider = "gemini"
/// model = "gemini-2.5-flash"
///
/// [match]
/// vs_ai = true
/// automated_side = "White"
/// ```
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Move-suggestion oracle settings.
    #[serde(default)]
    oracle: OracleConfig,

    /// Match settings.
    #[serde(default, rename = "match")]
    game: MatchConfig,
}

/// Settings for the LLM-backed move oracle.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct OracleConfig {
    /// LLM provider (openai, anthropic or gemini).
    #[serde(default = "default_provider")]
    provider: LlmProvider,

    /// Model name.
    #[serde(default = "default_model")]
    model: String,

    /// Maximum tokens for the reply.
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Deadline for one suggestion request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,

    /// Pause before the automated side moves, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,
}

/// Settings for a match.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Play against the automated opponent.
    #[serde(default = "default_true")]
    vs_ai: bool,

    /// Which side the automated opponent plays.
    #[serde(default = "default_automated_side")]
    automated_side: Player,

    /// Highlight legal moves on the board.
    #[serde(default = "default_true")]
    show_hints: bool,
}

fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_think_delay_ms() -> u64 {
    800
}

fn default_true() -> bool {
    true
}

fn default_automated_side() -> Player {
    Player::White
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            think_delay_ms: default_think_delay_ms(),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            vs_ai: true,
            automated_side: default_automated_side(),
            show_hints: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(provider = ?config.oracle.provider, model = %config.oracle.model, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    ///
    /// A file that exists but does not parse is still an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Mutable access to the match section (for CLI overrides).
    pub fn game_mut(&mut self) -> &mut MatchConfig {
        &mut self.game
    }
}

impl OracleConfig {
    /// Suggestion deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Pause before each automated move.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Creates LLM configuration from this oracle config.
    ///
    /// Reads the API key from `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` or
    /// `GEMINI_API_KEY` (falling back to `API_KEY` for Gemini).
    #[instrument(skip(self), fields(provider = ?self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let api_key = match self.provider {
            LlmProvider::OpenAI => std::env::var("OPENAI_API_KEY").map_err(|_| {
                ConfigError::new("OPENAI_API_KEY environment variable not set".to_string())
            })?,
            LlmProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                ConfigError::new("ANTHROPIC_API_KEY environment variable not set".to_string())
            })?,
            LlmProvider::Gemini => std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .map_err(|_| {
                    ConfigError::new(
                        "GEMINI_API_KEY (or API_KEY) environment variable not set".to_string(),
                    )
                })?,
        };

        Ok(LlmConfig::new(
            self.provider,
            api_key,
            self.model.clone(),
            self.max_tokens,
        ))
    }
}

impl MatchConfig {
    /// Turns the automated opponent on or off.
    pub fn set_vs_ai(&mut self, vs_ai: bool) {
        self.vs_ai = vs_ai;
    }

    /// Chooses which side the automated opponent plays.
    pub fn set_automated_side(&mut self, side: Player) {
        self.automated_side = side;
    }

    /// Shows or hides legal-move hints.
    pub fn set_show_hints(&mut self, show: bool) {
        self.show_hints = show;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
