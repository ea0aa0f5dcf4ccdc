//! Turn resolution after a move: continue, forced pass, or game over.

use super::super::{Board, Player, Transition};
use super::legality::has_legal_move;
use super::score::{count_pieces, outcome_for};
use tracing::{debug, instrument};

/// Decides who moves after `mover` produced `board`.
///
/// The check order is fixed: first the opponent, then the mover. A side
/// only passes when it is structurally the opponent's turn and the
/// opponent cannot move; the game ends only when neither side can move.
#[instrument(skip(board), fields(mover = %mover))]
pub fn resolve_turn(board: &Board, mover: Player) -> Transition {
    let opponent = mover.opponent();

    // Step 1: opponent moves next if it can.
    if has_legal_move(board, opponent) {
        return Transition::Continue { to_move: opponent };
    }

    // Step 2: opponent is stuck; mover goes again if it can.
    if has_legal_move(board, mover) {
        debug!(skipped = %opponent, "Opponent has no legal move, passing");
        return Transition::Passed {
            skipped: opponent,
            to_move: mover,
        };
    }

    let score = count_pieces(board);
    let outcome = outcome_for(score);
    debug!(%score, %outcome, "Neither side can move");
    Transition::Finished(outcome)
}
