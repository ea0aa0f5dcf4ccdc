//! Rooted history invariant: exactly one unplayed snapshot, at index 0.

use super::super::GameSession;
use super::Invariant;

/// Invariant: snapshot 0 is the starting position and every later
/// snapshot was produced by a move.
pub struct RootedHistory;

impl Invariant<GameSession> for RootedHistory {
    fn holds(session: &GameSession) -> bool {
        match session.history().split_first() {
            Some((root, rest)) => {
                root.played().is_none() && rest.iter().all(|snapshot| snapshot.played().is_some())
            }
            None => false,
        }
    }

    fn description() -> &'static str {
        "History starts with the unplayed starting position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveSource, Position};

    #[test]
    fn test_new_session_holds() {
        assert!(RootedHistory::holds(&GameSession::new()));
    }

    #[test]
    fn test_dropping_root_violates() {
        let mut session = GameSession::new();
        session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        session.history.remove(0);
        assert!(!RootedHistory::holds(&session));
    }
}
