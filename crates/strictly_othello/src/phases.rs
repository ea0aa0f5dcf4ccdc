//! Game phase and outcome types.

use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player finished with more discs.
    Winner(Player),
    /// Both players finished with the same number of discs.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Where a match currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for `to_move` to play.
    InProgress {
        /// The side whose turn it is.
        to_move: Player,
    },
    /// Neither side can move.
    GameOver(Outcome),
}

impl GameStatus {
    /// The side to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        match self {
            GameStatus::InProgress { to_move } => Some(*to_move),
            GameStatus::GameOver(_) => None,
        }
    }

    /// The final outcome, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress { .. } => None,
            GameStatus::GameOver(outcome) => Some(*outcome),
        }
    }

    /// True once neither side can move.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver(_))
    }
}

/// What happened to the turn order after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Turn passes to the opponent.
    Continue {
        /// The side to move next.
        to_move: Player,
    },
    /// The opponent has no legal move; the same side moves again.
    Passed {
        /// The side that had to pass.
        skipped: Player,
        /// The side to move next (the one that just moved).
        to_move: Player,
    },
    /// Neither side can move.
    Finished(Outcome),
}

impl Transition {
    /// Status the session is in after this transition.
    pub fn status(&self) -> GameStatus {
        match *self {
            Transition::Continue { to_move } | Transition::Passed { to_move, .. } => {
                GameStatus::InProgress { to_move }
            }
            Transition::Finished(outcome) => GameStatus::GameOver(outcome),
        }
    }
}
