//! Strictly Othello - pure Othello (Reversi) rules engine.
//!
//! # Architecture
//!
//! - **Types**: [`Board`] is a `Copy` value; rules never mutate a board in place
//! - **Rules**: legality, legal-move enumeration, capture, scoring, turn resolution
//! - **Session**: [`GameSession`] with pass handling, undo history and a
//!   generation counter for discarding stale asynchronous work
//! - **Suggestion**: validation of externally suggested moves with a
//!   deterministic corner-first fallback
//!
//! # Example
//!
//! ```
//! use strictly_othello::{GameSession, MoveSource, Player, Position};
//!
//! let mut session = GameSession::new();
//! session.play(Position::at(2, 3), MoveSource::Human).unwrap();
//! assert_eq!(session.to_move(), Some(Player::White));
//! assert_eq!(session.score().black, 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
pub mod invariants;
mod phases;
pub mod rules;
mod session;
mod suggestion;
mod types;

pub use action::{Move, MoveError, MoveSource};
pub use contracts::{Contract, LegalMove, MoveContract};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, SessionInvariants};
pub use phases::{GameStatus, Outcome, Transition};
pub use rules::{apply_move, count_pieces, is_legal, legal_moves, resolve_turn, Score};
pub use session::{GameSession, Snapshot};
pub use suggestion::{
    fallback_move, resolve_suggestion, validate_suggestion, FallbackReason, Resolution,
};
pub use types::{Board, Cell, ParseBoardError, Player, Position, BOARD_SIZE};
