//! Contract-based validation for Othello moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, SessionInvariants};
use super::rules;
use super::session::GameSession;
use tracing::{error, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must still be in progress.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] on a finished session.
    pub fn check(session: &GameSession) -> Result<(), MoveError> {
        if session.is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] when someone else is to move.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if session.to_move() != Some(mov.player) {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the position must be in the mover's legal-move list.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Fails with [`MoveError::IllegalPosition`] when the move captures nothing.
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        if rules::is_legal(session.board(), mov.position, mov.player) {
            Ok(())
        } else {
            Err(MoveError::IllegalPosition(mov.position))
        }
    }
}

/// Composite precondition: game running, player's turn, legal placement.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), MoveError> {
        GameNotOver::check(session)?;
        PlayersTurn::check(mov, session)?;
        LegalPlacement::check(mov, session)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game in progress
/// - Player's turn
/// - Position is legal
///
/// Postconditions:
/// - History grew by exactly one snapshot
/// - Session invariants hold
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, session)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: history went from {} to {} snapshots",
                before.history().len(),
                after.history().len()
            )));
        }

        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Panics if any session invariant is broken.
///
/// A broken invariant means the history and the board disagree; carrying on
/// would let the game continue on an inconsistent board.
#[track_caller]
pub fn assert_invariants(session: &GameSession) {
    if let Err(violations) = SessionInvariants::check_all(session) {
        error!(?violations, "Session invariants violated");
        panic!("State corruption: {:?}", violations);
    }
}
