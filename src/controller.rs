//! Match control: human input, the automated side and oracle requests.
//!
//! The controller owns the [`GameSession`]. When the automated side is to
//! move it spawns one oracle request, tagged with the session generation.
//! Replies come back over a channel and are applied by [`MatchController::poll`]
//! or [`MatchController::next_reply`]; a reply whose generation no longer
//! matches the session (because of an undo, reset or opponent toggle) is
//! dropped.

use crate::config::AppConfig;
use crate::oracle::{MoveOracle, OracleError};
use derive_new::new;
use std::sync::Arc;
use std::time::Duration;
use strictly_othello::{
    resolve_suggestion, FallbackReason, GameSession, Move, MoveError, MoveSource, Outcome,
    Player, Position, Resolution, Transition,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Events sent from the controller to the interaction surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// A move was played.
    MoveApplied {
        /// The move.
        action: Move,
        /// Who chose it.
        source: MoveSource,
    },
    /// A side had no legal move and was skipped.
    Passed {
        /// The side that passed.
        skipped: Player,
    },
    /// The automated side started thinking.
    Thinking {
        /// The side being decided for.
        player: Player,
    },
    /// The oracle's answer was not used; the fallback rule picked instead.
    FallbackUsed {
        /// The substitute move.
        position: Position,
        /// Why the suggestion was rejected.
        reason: FallbackReason,
    },
    /// An oracle reply arrived for a position that no longer exists.
    SuggestionDiscarded {
        /// Generation the request was made for.
        generation: u64,
    },
    /// Neither side can move.
    GameOver(Outcome),
    /// Moves were rolled back.
    Undone,
    /// The match restarted.
    Reset,
    /// The automated opponent was switched on or off.
    OpponentToggled {
        /// Whether the opponent is now active.
        enabled: bool,
    },
}

/// How a match is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    /// Black is driven by the oracle.
    pub black_automated: bool,
    /// White is driven by the oracle.
    pub white_automated: bool,
    /// Side that [`MatchController::toggle_opponent`] switches.
    pub opponent: Player,
    /// Pause before each automated move.
    pub think_delay: Duration,
    /// Deadline for one oracle request.
    pub timeout: Duration,
}

impl MatchSettings {
    /// Settings for an interactive match from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let side = *config.game().automated_side();
        let vs_ai = *config.game().vs_ai();
        Self {
            black_automated: vs_ai && side == Player::Black,
            white_automated: vs_ai && side == Player::White,
            opponent: side,
            think_delay: config.oracle().think_delay(),
            timeout: config.oracle().timeout(),
        }
    }

    /// Both sides automated (headless play).
    pub fn autoplay(config: &AppConfig) -> Self {
        Self {
            black_automated: true,
            white_automated: true,
            ..Self::from_config(config)
        }
    }

    /// True if `player` is driven by the oracle.
    pub fn is_automated(&self, player: Player) -> bool {
        match player {
            Player::Black => self.black_automated,
            Player::White => self.white_automated,
        }
    }

    fn set_automated(&mut self, player: Player, automated: bool) {
        match player {
            Player::Black => self.black_automated = automated,
            Player::White => self.white_automated = automated,
        }
    }
}

/// Oracle answer delivered back to the controller.
#[derive(Debug, new)]
struct SuggestionReply {
    generation: u64,
    player: Player,
    result: Result<Option<Position>, OracleError>,
}

#[derive(Debug)]
struct PendingRequest {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Drives a match between a human surface and the automated side.
pub struct MatchController {
    session: GameSession,
    oracle: Arc<dyn MoveOracle>,
    settings: MatchSettings,
    pending: Option<PendingRequest>,
    reply_tx: mpsc::UnboundedSender<SuggestionReply>,
    reply_rx: mpsc::UnboundedReceiver<SuggestionReply>,
    event_tx: mpsc::UnboundedSender<MatchEvent>,
}

impl MatchController {
    /// Creates a controller at the starting position.
    ///
    /// Nothing is requested from the oracle until [`start`](Self::start).
    #[instrument(skip(oracle, event_tx), fields(oracle = %oracle.name()))]
    pub fn new(
        oracle: Arc<dyn MoveOracle>,
        settings: MatchSettings,
        event_tx: mpsc::UnboundedSender<MatchEvent>,
    ) -> Self {
        info!(?settings, "Creating match controller");
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            session: GameSession::new(),
            oracle,
            settings,
            pending: None,
            reply_tx,
            reply_rx,
            event_tx,
        }
    }

    /// Kicks off the automated side if it moves first.
    pub fn start(&mut self) {
        self.schedule_automated();
    }

    /// Returns the session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// True while an oracle request is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// True if the automated opponent is active.
    pub fn opponent_enabled(&self) -> bool {
        self.settings.is_automated(self.settings.opponent)
    }

    /// True if a human may move right now.
    pub fn awaiting_human(&self) -> bool {
        match self.session.to_move() {
            Some(player) => !self.settings.is_automated(player) && !self.is_thinking(),
            None => false,
        }
    }

    /// Attempts a human move.
    ///
    /// Returns `Ok(false)` without touching the game when the game is over,
    /// it is the automated side's turn, or a suggestion is pending.
    ///
    /// # Errors
    ///
    /// Returns the rules error for an illegal position.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn attempt_move(&mut self, position: Position) -> Result<bool, MoveError> {
        if !self.awaiting_human() {
            debug!("Not accepting human input now");
            return Ok(false);
        }
        self.apply(position, MoveSource::Human)?;
        self.schedule_automated();
        Ok(true)
    }

    /// Rolls back the last human move and any automated replies after it.
    ///
    /// An outstanding oracle request is cancelled. Does nothing when no
    /// human move has been played.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn undo(&mut self) -> bool {
        if !self.session.undo() {
            return false;
        }
        self.cancel_pending();
        self.emit(MatchEvent::Undone);
        self.schedule_automated();
        true
    }

    /// Restarts the match. An outstanding oracle request is cancelled.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.session.reset();
        self.emit(MatchEvent::Reset);
        self.schedule_automated();
    }

    /// Switches the automated opponent on or off.
    #[instrument(skip(self))]
    pub fn toggle_opponent(&mut self) {
        let enabled = !self.opponent_enabled();
        self.settings.set_automated(self.settings.opponent, enabled);
        info!(enabled, side = %self.settings.opponent, "Opponent toggled");
        self.emit(MatchEvent::OpponentToggled { enabled });

        if !enabled && self.pending.is_some() {
            self.cancel_pending();
        }
        self.schedule_automated();
    }

    /// Applies every oracle reply that has already arrived.
    ///
    /// Returns the number of replies handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.handle_reply(reply);
            handled += 1;
        }
        handled
    }

    /// Waits for the next oracle reply and applies it.
    ///
    /// Returns `false` immediately if nothing is pending.
    pub async fn next_reply(&mut self) -> bool {
        if self.pending.is_none() {
            return false;
        }
        match self.reply_rx.recv().await {
            Some(reply) => {
                self.handle_reply(reply);
                true
            }
            None => false,
        }
    }

    #[instrument(skip(self, reply), fields(reply_generation = reply.generation, generation = self.session.generation()))]
    fn handle_reply(&mut self, reply: SuggestionReply) {
        let current = self.session.generation();
        let pending_matches = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == reply.generation);

        if reply.generation != current || !pending_matches {
            debug!("Discarding stale suggestion");
            self.emit(MatchEvent::SuggestionDiscarded {
                generation: reply.generation,
            });
            return;
        }
        self.pending = None;

        if self.session.to_move() != Some(reply.player) {
            warn!(player = %reply.player, "Reply for a side that is not to move");
            return;
        }

        let legal = self.session.legal_moves();
        let resolution = resolve_suggestion(reply.result, &legal);
        let position = match resolution {
            Resolution::Suggested(position) => position,
            Resolution::Fallback { position, reason } => {
                self.emit(MatchEvent::FallbackUsed { position, reason });
                position
            }
            Resolution::NoMove => {
                warn!("Automated side has no legal move");
                return;
            }
        };

        if let Err(e) = self.apply(position, MoveSource::Automated) {
            // resolve_suggestion only returns members of `legal`.
            panic!("State corruption: resolved move {position} rejected: {e}");
        }
        self.schedule_automated();
    }

    fn apply(&mut self, position: Position, source: MoveSource) -> Result<(), MoveError> {
        let transition = self.session.play(position, source)?;
        let action = self
            .session
            .history()
            .last()
            .and_then(|snapshot| snapshot.played())
            .map(|(action, _)| action);
        if let Some(action) = action {
            self.emit(MatchEvent::MoveApplied { action, source });
        }

        match transition {
            Transition::Continue { .. } => {}
            Transition::Passed { skipped, .. } => {
                info!(%skipped, "Side passes");
                self.emit(MatchEvent::Passed { skipped });
            }
            Transition::Finished(outcome) => {
                info!(%outcome, score = %self.session.score(), "Game over");
                self.emit(MatchEvent::GameOver(outcome));
            }
        }
        Ok(())
    }

    /// Spawns an oracle request if the automated side is to move.
    fn schedule_automated(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(player) = self.session.to_move() else {
            return;
        };
        if !self.settings.is_automated(player) {
            return;
        }

        let generation = self.session.generation();
        let board = *self.session.board();
        let legal = self.session.legal_moves();
        let oracle = Arc::clone(&self.oracle);
        let reply_tx = self.reply_tx.clone();
        let think_delay = self.settings.think_delay;
        let timeout = self.settings.timeout;

        debug!(%player, generation, oracle = %oracle.name(), "Requesting suggestion");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(think_delay).await;
            // The oracle runs in its own task so a panic inside it still
            // produces a reply.
            let mut request =
                tokio::spawn(async move { oracle.suggest(&board, player, &legal).await });
            let result = match tokio::time::timeout(timeout, &mut request).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    warn!(error = %e, "Oracle task failed");
                    Err(OracleError::unavailable(format!("oracle task failed: {}", e)))
                }
                Err(_) => {
                    request.abort();
                    Err(OracleError::timeout(format!(
                        "no suggestion within {}ms",
                        timeout.as_millis()
                    )))
                }
            };
            if reply_tx
                .send(SuggestionReply::new(generation, player, result))
                .is_err()
            {
                debug!("Controller gone, dropping suggestion");
            }
        });

        self.pending = Some(PendingRequest { generation, handle });
        self.emit(MatchEvent::Thinking { player });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(generation = pending.generation, "Cancelling oracle request");
            pending.handle.abort();
        }
    }

    fn emit(&self, event: MatchEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

impl Drop for MatchController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
