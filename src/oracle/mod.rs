//! Move-suggestion oracles for the automated side.
//!
//! An oracle only *suggests*. Whatever it returns is checked against the
//! legal moves by [`strictly_othello::resolve_suggestion`] before it is
//! played, so a wrong or failed suggestion can never corrupt a game.

mod fallback;
mod llm;

pub use fallback::FallbackOracle;
pub use llm::{parse_reply, LlmOracle, SuggestedMove};

use crate::config::OracleConfig;
use crate::llm_client::LlmClient;
use derive_more::{Display, Error};
use std::sync::Arc;
use strictly_othello::{Board, Player, Position};
use tracing::{info, warn};

/// Source of move suggestions.
#[async_trait::async_trait]
pub trait MoveOracle: Send + Sync {
    /// Suggests a move for `player` on `board`.
    ///
    /// `legal` is the full list of legal moves in row-major order. `Ok(None)`
    /// means the oracle declines to suggest anything.
    async fn suggest(
        &self,
        board: &Board,
        player: Player,
        legal: &[Position],
    ) -> Result<Option<Position>, OracleError>;

    /// Returns the oracle's display name.
    fn name(&self) -> &str;
}

/// Why an oracle call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OracleErrorKind {
    /// The backing service could not be reached or refused the request.
    #[display("unavailable")]
    Unavailable,
    /// No answer arrived before the deadline.
    #[display("timeout")]
    Timeout,
    /// An answer arrived but did not contain a usable move.
    #[display("malformed response")]
    MalformedResponse,
}

/// Oracle failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Oracle error ({}): {} at {}:{}", kind, message, file, line)]
pub struct OracleError {
    /// Failure category.
    pub kind: OracleErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new oracle error.
    #[track_caller]
    pub fn new(kind: OracleErrorKind, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Service could not be reached.
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Unavailable, message.into())
    }

    /// Deadline passed.
    #[track_caller]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::Timeout, message.into())
    }

    /// Reply could not be read as a move.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(OracleErrorKind::MalformedResponse, message.into())
    }
}

/// Builds the oracle described by `config`.
///
/// Without an API key for the configured provider the offline
/// [`FallbackOracle`] is used instead.
pub fn from_config(config: &OracleConfig) -> Arc<dyn MoveOracle> {
    match config.create_llm_config() {
        Ok(llm_config) => {
            info!(provider = ?llm_config.provider(), model = %llm_config.model(), "Using LLM oracle");
            Arc::new(LlmOracle::new(LlmClient::new(llm_config)))
        }
        Err(e) => {
            warn!(error = %e, "No LLM credentials, using offline fallback oracle");
            Arc::new(FallbackOracle)
        }
    }
}
