//! History tail invariant: the last snapshot is the current state.

use super::super::GameSession;
use super::Invariant;

/// Invariant: the newest snapshot holds the current board and status.
pub struct HistoryTailMatchesBoard;

impl Invariant<GameSession> for HistoryTailMatchesBoard {
    fn holds(session: &GameSession) -> bool {
        session
            .history()
            .last()
            .is_some_and(|tail| {
                tail.board() == session.board() && tail.status() == session.status()
            })
    }

    fn description() -> &'static str {
        "Last history snapshot equals the current board and status"
    }
}
