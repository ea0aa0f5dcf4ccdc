//! Game rules for Othello.
//!
//! This module contains pure functions for evaluating board positions.
//! Rules are separated from board storage and from the session so they
//! can be composed into contracts and called from any thread.

pub mod capture;
pub mod legality;
pub mod score;
pub mod turn;

pub use capture::{apply_move, flips};
pub use legality::{has_legal_move, is_legal, legal_moves, DIRECTIONS};
pub use score::{count_pieces, outcome_for, Score};
pub use turn::resolve_turn;
