//! Match session: turn order, passes, terminal state and undo history.

use super::action::{Move, MoveError, MoveSource};
use super::contracts::{assert_invariants, Contract, MoveContract};
use super::phases::{GameStatus, Outcome, Transition};
use super::rules::{self, Score};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// One entry of the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub(crate) board: Board,
    pub(crate) status: GameStatus,
    pub(crate) played: Option<(Move, MoveSource)>,
}

impl Snapshot {
    fn root(board: Board, status: GameStatus) -> Self {
        Self {
            board,
            status,
            played: None,
        }
    }

    /// Board after this snapshot's move.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status that held at this snapshot.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The move that produced this snapshot (`None` for the starting position).
    pub fn played(&self) -> Option<(Move, MoveSource)> {
        self.played
    }

    fn source(&self) -> Option<MoveSource> {
        self.played.map(|(_, source)| source)
    }
}

/// A single Othello match.
///
/// The session owns the current board, whose turn it is, and the full
/// history of board snapshots (index 0 is the starting position). The
/// last snapshot always equals the current board.
///
/// Every change (move, undo, reset) bumps [`generation`](Self::generation),
/// so work started against an older state can be recognised as stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) board: Board,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<Snapshot>,
    generation: u64,
}

impl GameSession {
    /// Creates a session at the standard starting position, Black to move.
    #[instrument]
    pub fn new() -> Self {
        let board = Board::initial();
        let status = GameStatus::InProgress {
            to_move: Player::Black,
        };
        Self {
            board,
            status,
            history: vec![Snapshot::root(board, status)],
            generation: 0,
        }
    }

    /// Creates a session starting from an arbitrary position.
    ///
    /// If `to_move` cannot play, the turn goes to the opponent; if neither
    /// side can play the session starts finished.
    #[instrument(skip(board))]
    pub fn from_position(board: Board, to_move: Player) -> Self {
        let status = if rules::has_legal_move(&board, to_move) {
            GameStatus::InProgress { to_move }
        } else {
            rules::resolve_turn(&board, to_move.opponent()).status()
        };
        Self {
            board,
            status,
            history: vec![Snapshot::root(board, status)],
            generation: 0,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move, `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        self.status.to_move()
    }

    /// True once neither side can move.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Final outcome, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    /// Legal moves for the side to move (empty when the game is over).
    pub fn legal_moves(&self) -> Vec<Position> {
        match self.to_move() {
            Some(player) => rules::legal_moves(&self.board, player),
            None => Vec::new(),
        }
    }

    /// Current disc count.
    pub fn score(&self) -> Score {
        rules::count_pieces(&self.board)
    }

    /// All snapshots, oldest first.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Counter bumped on every state change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Plays `position` for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game has finished and
    /// [`MoveError::IllegalPosition`] if the position is not a legal move.
    /// The session is unchanged on error.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn play(
        &mut self,
        position: Position,
        source: MoveSource,
    ) -> Result<Transition, MoveError> {
        let mover = self.to_move().ok_or(MoveError::GameOver)?;
        self.make_move(Move::new(mover, position), source)
    }

    /// Applies a fully specified move.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, it is not `action.player`'s turn, or the
    /// position is illegal. The session is unchanged on error.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn make_move(&mut self, action: Move, source: MoveSource) -> Result<Transition, MoveError> {
        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let board = rules::apply_move(&self.board, action.position, action.player)?;
        let transition = rules::resolve_turn(&board, action.player);

        self.board = board;
        self.status = transition.status();
        self.history.push(Snapshot {
            board,
            status: self.status,
            played: Some((action, source)),
        });
        self.generation += 1;

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            panic!("State corruption after {action}: {e}");
        }
        assert_invariants(self);

        info!(
            %action,
            %source,
            score = %self.score(),
            ?transition,
            "Move applied"
        );
        Ok(transition)
    }

    /// Rolls back the latest human move, together with any automated
    /// replies made after it.
    ///
    /// Trailing automated snapshots are removed first, then one human
    /// snapshot. Without an automated opponent this removes exactly one
    /// snapshot. Board and status are restored from the new last snapshot.
    ///
    /// Returns `false` (and does nothing) when no human move has been
    /// played yet.
    #[instrument(skip(self), fields(generation = self.generation, history = self.history.len()))]
    pub fn undo(&mut self) -> bool {
        let has_human_move = self
            .history
            .iter()
            .any(|snapshot| snapshot.source() == Some(MoveSource::Human));
        if !has_human_move {
            debug!("Nothing to undo");
            return false;
        }

        let mut removed = 0;
        while self.history.len() > 1 && self.tail().source() == Some(MoveSource::Automated) {
            self.history.pop();
            removed += 1;
        }
        if self.history.len() > 1 && self.tail().source() == Some(MoveSource::Human) {
            self.history.pop();
            removed += 1;
        }

        let tail = *self.tail();
        self.board = tail.board;
        self.status = tail.status;
        self.generation += 1;
        assert_invariants(self);

        info!(removed, status = ?self.status, "Undo applied");
        true
    }

    /// Starts the match over from the standard starting position.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::new();
        self.generation = generation;
        info!("Session reset");
    }

    fn tail(&self) -> &Snapshot {
        match self.history.last() {
            Some(snapshot) => snapshot,
            None => panic!("State corruption: session history lost its starting snapshot"),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new();
        assert_eq!(session.to_move(), Some(Player::Black));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.board(), &Board::initial());
        assert_eq!(session.legal_moves().len(), 4);
    }

    #[test]
    fn test_play_alternates_and_records() {
        let mut session = GameSession::new();
        let transition = session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        assert_eq!(
            transition,
            Transition::Continue {
                to_move: Player::White
            }
        );
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().last().unwrap().board(), session.board());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_illegal_play_leaves_session_untouched() {
        let mut session = GameSession::new();
        let before = session.clone();
        assert_eq!(
            session.play(Position::at(0, 0), MoveSource::Human),
            Err(MoveError::IllegalPosition(Position::at(0, 0)))
        );
        assert_eq!(session.board(), before.board());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.generation(), before.generation());
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut session = GameSession::new();
        let action = Move::new(Player::White, Position::at(2, 4));
        assert_eq!(
            session.make_move(action, MoveSource::Human),
            Err(MoveError::WrongPlayer(Player::White))
        );
    }

    #[test]
    fn test_undo_on_fresh_session_is_noop() {
        let mut session = GameSession::new();
        assert!(!session.undo());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_undo_round_trip_hot_seat() {
        let mut session = GameSession::new();
        session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        let board = *session.board();
        let to_move = session.to_move();

        session.play(Position::at(2, 2), MoveSource::Human).unwrap();
        assert!(session.undo());

        assert_eq!(session.board(), &board);
        assert_eq!(session.to_move(), to_move);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_undo_removes_automated_reply_with_human_move() {
        let mut session = GameSession::new();
        session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        session.play(Position::at(2, 2), MoveSource::Automated).unwrap();
        assert_eq!(session.history().len(), 3);

        assert!(session.undo());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.board(), &Board::initial());
        assert_eq!(session.to_move(), Some(Player::Black));
    }

    #[test]
    fn test_undo_removes_every_trailing_automated_move() {
        let mut session = GameSession::new();
        for position in [Position::at(2, 3), Position::at(2, 2), Position::at(2, 1)] {
            session.play(position, MoveSource::Human).unwrap();
        }
        for _ in 0..2 {
            let position = session.legal_moves()[0];
            session.play(position, MoveSource::Automated).unwrap();
        }
        assert_eq!(session.history().len(), 6);
        let expected = session.history()[2];

        assert!(session.undo());
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.board(), expected.board());
        assert_eq!(session.status(), expected.status());
    }

    #[test]
    fn test_undo_without_human_move_is_noop() {
        let mut session = GameSession::new();
        let position = session.legal_moves()[0];
        session.play(position, MoveSource::Automated).unwrap();
        let board = *session.board();
        let generation = session.generation();

        assert!(!session.undo());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.board(), &board);
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn test_reset_bumps_generation() {
        let mut session = GameSession::new();
        session.play(Position::at(2, 3), MoveSource::Human).unwrap();
        session.reset();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.board(), &Board::initial());
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_from_position_hands_turn_to_side_that_can_move() {
        let board: Board = "
            BW......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();
        let session = GameSession::from_position(board, Player::White);
        assert_eq!(session.to_move(), Some(Player::Black));
    }
}
