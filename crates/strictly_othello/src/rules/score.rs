//! Disc counting and final outcome.

use super::super::{Board, Cell, Outcome, Player};
use serde::{Deserialize, Serialize};

/// Disc count for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Score {
    /// Discs owned by Black.
    pub black: usize,
    /// Discs owned by White.
    pub white: usize,
}

impl Score {
    /// Total discs on the board.
    pub fn total(&self) -> usize {
        self.black + self.white
    }

    /// Discs owned by `player`.
    pub fn of(&self, player: Player) -> usize {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// The side with more discs, `None` when level.
    pub fn leader(&self) -> Option<Player> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.black, self.white)
    }
}

/// Counts discs by side.
pub fn count_pieces(board: &Board) -> Score {
    board
        .cells()
        .iter()
        .flatten()
        .fold(Score::default(), |mut score, cell| {
            match cell {
                Cell::Occupied(Player::Black) => score.black += 1,
                Cell::Occupied(Player::White) => score.white += 1,
                Cell::Empty => {}
            }
            score
        })
}

/// More discs wins, equal counts draw.
pub fn outcome_for(score: Score) -> Outcome {
    match score.leader() {
        Some(player) => Outcome::Winner(player),
        None => Outcome::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_score() {
        let score = count_pieces(&Board::initial());
        assert_eq!(score, Score { black: 2, white: 2 });
        assert_eq!(score.total(), 4);
        assert_eq!(outcome_for(score), Outcome::Draw);
    }

    #[test]
    fn test_outcome_by_majority() {
        assert_eq!(
            outcome_for(Score { black: 40, white: 24 }),
            Outcome::Winner(Player::Black)
        );
        assert_eq!(
            outcome_for(Score { black: 3, white: 9 }),
            Outcome::Winner(Player::White)
        );
    }
}
