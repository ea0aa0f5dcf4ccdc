//! One-disc-per-move invariant: each snapshot adds exactly one disc.

use super::super::{Cell, GameSession};
use super::Invariant;

/// Invariant: every move puts exactly one new disc on the board, owned by
/// the mover, at the played position.
///
/// Flips change owners but never the disc count.
pub struct OneDiscPerMove;

impl Invariant<GameSession> for OneDiscPerMove {
    fn holds(session: &GameSession) -> bool {
        session.history().windows(2).all(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            let Some((action, _)) = next.played() else {
                return false;
            };
            next.board().occupied() == prev.board().occupied() + 1
                && prev.board().is_empty(action.position)
                && next.board().get(action.position) == Cell::Occupied(action.player)
        })
    }

    fn description() -> &'static str {
        "Each move adds exactly one disc, at the played position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveSource, Player, Position};

    #[test]
    fn test_holds_over_several_moves() {
        let mut session = GameSession::new();
        session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        session.play(Position::at(2, 2), MoveSource::Human).unwrap();
        session.play(Position::at(2, 1), MoveSource::Human).unwrap();
        assert!(OneDiscPerMove::holds(&session));
    }

    #[test]
    fn test_extra_disc_in_snapshot_violates() {
        let mut session = GameSession::new();
        session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        let tail = session.history.len() - 1;
        session.history[tail].board = session.history[tail]
            .board
            .with(Position::at(0, 0), Cell::Occupied(Player::White));
        assert!(!OneDiscPerMove::holds(&session));
    }
}
