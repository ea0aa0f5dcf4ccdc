//! Legality test and legal-move enumeration.

use super::super::{Board, Cell, Player, Position};
use tracing::instrument;

/// The eight ray directions as `(row delta, column delta)`.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Collects the opponent discs bracketed by `player` along one direction.
///
/// Returns an empty run when the scan leaves the board or reaches an empty
/// cell before meeting one of `player`'s discs.
pub(crate) fn bracketed_run(
    board: &Board,
    from: Position,
    player: Player,
    direction: (isize, isize),
) -> Vec<Position> {
    let opponent = Cell::Occupied(player.opponent());
    let mut run = Vec::new();
    let mut cursor = from.step(direction);

    while let Some(pos) = cursor {
        match board.get(pos) {
            cell if cell == opponent => run.push(pos),
            Cell::Occupied(_) => return run,
            Cell::Empty => break,
        }
        cursor = pos.step(direction);
    }

    run.clear();
    run
}

/// Checks whether `player` may place a disc at `pos`.
///
/// The cell must be empty and at least one direction must hold one or more
/// opponent discs followed by one of `player`'s discs.
#[instrument(level = "trace", skip(board))]
pub fn is_legal(board: &Board, pos: Position, player: Player) -> bool {
    board.is_empty(pos)
        && DIRECTIONS
            .iter()
            .any(|&direction| !bracketed_run(board, pos, player, direction).is_empty())
}

/// Every legal position for `player`, in row-major order.
///
/// Returns an empty list when the player has to pass.
#[instrument(level = "trace", skip(board))]
pub fn legal_moves(board: &Board, player: Player) -> Vec<Position> {
    Position::all()
        .filter(|pos| is_legal(board, *pos, player))
        .collect()
}

/// True if `player` has at least one legal move.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    Position::all().any(|pos| is_legal(board, pos, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_moves_for_black() {
        let moves = legal_moves(&Board::initial(), Player::Black);
        assert_eq!(
            moves,
            vec![
                Position::at(2, 3),
                Position::at(3, 2),
                Position::at(4, 5),
                Position::at(5, 4),
            ]
        );
    }

    #[test]
    fn test_opening_moves_for_white() {
        let moves = legal_moves(&Board::initial(), Player::White);
        assert_eq!(
            moves,
            vec![
                Position::at(2, 4),
                Position::at(3, 5),
                Position::at(4, 2),
                Position::at(5, 3),
            ]
        );
    }

    #[test]
    fn test_occupied_cell_is_illegal() {
        let board = Board::initial();
        assert!(!is_legal(&board, Position::at(3, 3), Player::Black));
    }

    #[test]
    fn test_run_ending_at_edge_is_not_a_capture() {
        let board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            .WW.....
        "
        .parse()
        .unwrap();
        assert!(!is_legal(&board, Position::at(7, 0), Player::Black));
        assert!(!is_legal(&board, Position::at(7, 3), Player::Black));
    }

    #[test]
    fn test_run_ending_at_empty_is_not_a_capture() {
        let board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            .WW.B...
        "
        .parse()
        .unwrap();
        assert!(!is_legal(&board, Position::at(7, 0), Player::Black));
        assert!(!is_legal(&board, Position::at(7, 3), Player::Black));
    }

    #[test]
    fn test_adjacent_own_disc_is_not_a_capture() {
        let board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            .B.W....
        "
        .parse()
        .unwrap();
        assert!(!is_legal(&board, Position::at(7, 0), Player::Black));
        assert!(!is_legal(&board, Position::at(7, 2), Player::Black));
    }

    #[test]
    fn test_diagonal_capture() {
        let board: Board = "
            ........
            .W......
            ..B.....
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();
        assert!(is_legal(&board, Position::at(0, 0), Player::Black));
        assert!(is_legal(&board, Position::at(3, 3), Player::White));
    }

    #[test]
    fn test_illegal_positions_never_listed() {
        let board = Board::initial();
        for player in [Player::Black, Player::White] {
            let moves = legal_moves(&board, player);
            for pos in Position::all() {
                assert_eq!(moves.contains(&pos), is_legal(&board, pos, player));
            }
        }
    }

    #[test]
    fn test_legal_moves_is_repeatable() {
        let board = Board::initial();
        assert_eq!(
            legal_moves(&board, Player::Black),
            legal_moves(&board, Player::Black)
        );
    }

    #[test]
    fn test_empty_board_has_no_moves() {
        assert!(legal_moves(&Board::empty(), Player::Black).is_empty());
        assert!(!has_legal_move(&Board::empty(), Player::White));
    }
}
