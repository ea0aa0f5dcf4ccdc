//! Move application with directional flipping.

use super::super::{Board, Cell, MoveError, Player, Position};
use super::legality::{bracketed_run, is_legal, DIRECTIONS};
use tracing::{instrument, trace};

/// Discs that `player` would flip by playing at `pos`.
///
/// Directions are evaluated independently in [`DIRECTIONS`] order and the
/// runs are concatenated. Empty when the move captures nothing.
pub fn flips(board: &Board, pos: Position, player: Player) -> Vec<Position> {
    DIRECTIONS
        .iter()
        .flat_map(|&direction| bracketed_run(board, pos, player, direction))
        .collect()
}

/// Places a disc for `player` at `pos` and flips every bracketed run.
///
/// Returns a new board; `board` itself is left untouched.
///
/// # Errors
///
/// Returns [`MoveError::IllegalPosition`] if the move fails the legality test.
#[instrument(skip(board), fields(position = %pos, player = %player))]
pub fn apply_move(board: &Board, pos: Position, player: Player) -> Result<Board, MoveError> {
    if !is_legal(board, pos, player) {
        return Err(MoveError::IllegalPosition(pos));
    }

    let captured = flips(board, pos, player);
    trace!(flipped = captured.len(), "Applying move");

    let mut next = *board;
    next.set(pos, Cell::Occupied(player));
    for flipped in captured {
        next.set(flipped, Cell::Occupied(player));
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{count_pieces, legal_moves};

    #[test]
    fn test_opening_capture() {
        let board = Board::initial();
        let next = apply_move(&board, Position::at(2, 3), Player::Black).unwrap();

        assert_eq!(next.get(Position::at(2, 3)), Cell::Occupied(Player::Black));
        assert_eq!(next.get(Position::at(3, 3)), Cell::Occupied(Player::Black));
        assert_eq!(next.get(Position::at(4, 4)), Cell::Occupied(Player::White));
        let score = count_pieces(&next);
        assert_eq!((score.black, score.white), (4, 1));

        // Input board is unchanged.
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_illegal_move_rejected() {
        let board = Board::initial();
        assert_eq!(
            apply_move(&board, Position::at(0, 0), Player::Black),
            Err(MoveError::IllegalPosition(Position::at(0, 0)))
        );
        assert_eq!(
            apply_move(&board, Position::at(3, 3), Player::Black),
            Err(MoveError::IllegalPosition(Position::at(3, 3)))
        );
    }

    #[test]
    fn test_multi_direction_flips_are_cumulative() {
        let board: Board = "
            B.B.B...
            .WWW....
            BW.WB...
            .WWW....
            B.B.B...
            ........
            ........
            ........
        "
        .parse()
        .unwrap();
        let next = apply_move(&board, Position::at(2, 2), Player::Black).unwrap();
        assert_eq!(flips(&board, Position::at(2, 2), Player::Black).len(), 8);
        for pos in [
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3),
        ] {
            assert_eq!(
                next.get(Position::at(pos.0, pos.1)),
                Cell::Occupied(Player::Black),
                "{:?} should be flipped",
                pos
            );
        }
        assert_eq!(count_pieces(&next).white, 0);
    }

    #[test]
    fn test_unbracketed_direction_not_flipped() {
        let board: Board = "
            ........
            ........
            ........
            ..WWB...
            ..W.....
            ........
            ........
            ........
        "
        .parse()
        .unwrap();
        // From (3,1): right run W,W ends at B; down-right run ends at empty.
        let next = apply_move(&board, Position::at(3, 1), Player::Black).unwrap();
        assert_eq!(next.get(Position::at(3, 2)), Cell::Occupied(Player::Black));
        assert_eq!(next.get(Position::at(3, 3)), Cell::Occupied(Player::Black));
        assert_eq!(next.get(Position::at(4, 2)), Cell::Occupied(Player::White));
    }

    #[test]
    fn test_every_legal_move_adds_exactly_one_disc() {
        let mut board = Board::initial();
        let mut player = Player::Black;
        for _ in 0..20 {
            let moves = legal_moves(&board, player);
            let Some(&pos) = moves.last() else { break };
            let before = count_pieces(&board).total();
            board = apply_move(&board, pos, player).unwrap();
            assert_eq!(count_pieces(&board).total(), before + 1);
            player = player.opponent();
        }
    }
}
