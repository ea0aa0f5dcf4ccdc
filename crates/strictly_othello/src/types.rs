//! Core domain types for Othello.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// One of the two competing sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum Player {
    /// First player (moves first).
    Black,
    /// Second player.
    White,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-character glyph used in text boards and prompts.
    pub fn glyph(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a disc of the given player.
    Occupied(Player),
}

impl Cell {
    /// Returns the owner of the cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Glyph used in text boards: `B`, `W` or `.`.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(player) => player.glyph(),
        }
    }
}

/// A cell coordinate, always inside the board.
///
/// Serialized as `{"r": row, "c": col}`, the shape the move-suggestion
/// oracle answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Coords", into = "Coords")]
pub struct Position {
    row: u8,
    col: u8,
}

/// Unchecked wire form of a [`Position`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Coords {
    r: i64,
    c: i64,
}

impl TryFrom<Coords> for Position {
    type Error = String;

    fn try_from(coords: Coords) -> Result<Self, Self::Error> {
        let row = usize::try_from(coords.r).ok();
        let col = usize::try_from(coords.c).ok();
        row.zip(col)
            .and_then(|(row, col)| Position::new(row, col))
            .ok_or_else(|| format!("({},{}) is off the board", coords.r, coords.c))
    }
}

impl From<Position> for Coords {
    fn from(pos: Position) -> Self {
        Self {
            r: i64::from(pos.row),
            c: i64::from(pos.col),
        }
    }
}

impl Position {
    /// The four corner cells in row-major order.
    pub const CORNERS: [Position; 4] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: 7 },
        Position { row: 7, col: 0 },
        Position { row: 7, col: 7 },
    ];

    /// Creates a position, or `None` when outside the 8x8 grid.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Creates a position that is known to be on the board.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` is 8 or more.
    #[track_caller]
    pub fn at(row: usize, col: usize) -> Self {
        match Self::new(row, col) {
            Some(pos) => pos,
            None => panic!("position ({row},{col}) is off the board"),
        }
    }

    /// Row index (0-7).
    pub fn row(self) -> usize {
        usize::from(self.row)
    }

    /// Column index (0-7).
    pub fn col(self) -> usize {
        usize::from(self.col)
    }

    /// True for (0,0), (0,7), (7,0) and (7,7).
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Neighbouring position one step along `(dr, dc)`, if still on the board.
    pub fn step(self, (dr, dc): (isize, isize)) -> Option<Self> {
        let row = self.row().checked_add_signed(dr)?;
        let col = self.col().checked_add_signed(dc)?;
        Self::new(row, col)
    }

    /// All 64 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::at(row, col)))
    }

    /// Board label in `A1` notation (column letter, row number).
    pub fn label(self) -> String {
        format!("{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// 8x8 Othello board.
///
/// A `Board` is a plain value: rules functions never modify a board they are
/// given, they return a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order.
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board with no discs on it.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the standard starting position.
    ///
    /// White holds (3,3) and (4,4), Black holds (3,4) and (4,3).
    #[instrument]
    pub fn initial() -> Self {
        Self::empty()
            .with(Position::at(3, 3), Cell::Occupied(Player::White))
            .with(Position::at(3, 4), Cell::Occupied(Player::Black))
            .with(Position::at(4, 3), Cell::Occupied(Player::Black))
            .with(Position::at(4, 4), Cell::Occupied(Player::White))
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row()][pos.col()]
    }

    /// Returns a copy of this board with one cell replaced.
    #[must_use]
    pub fn with(mut self, pos: Position, cell: Cell) -> Self {
        self.set(pos, cell);
        self
    }

    /// Overwrites a cell. Only used on boards the crate owns.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row()][pos.col()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells, row-major.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

/// Error parsing a text board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// The text did not contain exactly eight non-blank lines.
    #[display("expected 8 rows, found {}", _0)]
    RowCount(usize),

    /// A row did not contain exactly eight cells.
    #[display("row {} has {} cells, expected 8", _0, _1)]
    RowLength(usize, usize),

    /// A character other than `B`, `W` or `.` was found.
    #[display("unexpected glyph {:?} in row {}", _1, _0)]
    Glyph(usize, char),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses eight lines of `B`, `W` and `.` (whitespace inside a line is ignored).
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength(row, glyphs.len()));
            }
            for (col, glyph) in glyphs.into_iter().enumerate() {
                let cell = match glyph {
                    'B' | 'b' => Cell::Occupied(Player::Black),
                    'W' | 'w' => Cell::Occupied(Player::White),
                    '.' => Cell::Empty,
                    other => return Err(ParseBoardError::Glyph(row, other)),
                };
                board.set(Position::at(row, col), cell);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board_layout() {
        let board = Board::initial();
        assert_eq!(board.get(Position::at(3, 3)), Cell::Occupied(Player::White));
        assert_eq!(board.get(Position::at(3, 4)), Cell::Occupied(Player::Black));
        assert_eq!(board.get(Position::at(4, 3)), Cell::Occupied(Player::Black));
        assert_eq!(board.get(Position::at(4, 4)), Cell::Occupied(Player::White));
        assert_eq!(board.occupied(), 4);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let board = Board::initial();
        let changed = board.with(Position::at(0, 0), Cell::Occupied(Player::Black));
        assert!(board.is_empty(Position::at(0, 0)));
        assert!(!changed.is_empty(Position::at(0, 0)));
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
        assert_eq!(Position::at(0, 0).step((-1, 0)), None);
        assert_eq!(Position::at(6, 6).step((1, 1)), Some(Position::at(7, 7)));
    }

    #[test]
    fn test_all_positions_row_major() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Position::at(0, 0));
        assert_eq!(all[1], Position::at(0, 1));
        assert_eq!(all[8], Position::at(1, 0));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_corners() {
        assert!(Position::at(0, 7).is_corner());
        assert!(!Position::at(1, 1).is_corner());
    }

    #[test]
    fn test_board_text_round_trip() {
        let board = Board::initial();
        let text = board.to_string();
        assert_eq!(text.lines().nth(3), Some("...WB..."));
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_rejects_bad_glyph() {
        let text = "........\n........\n........\n...WX...\n...BW...\n........\n........\n........";
        assert_eq!(text.parse::<Board>(), Err(ParseBoardError::Glyph(3, 'X')));
    }

    #[test]
    fn test_position_wire_format() {
        let json = serde_json::to_string(&Position::at(2, 3)).unwrap();
        assert_eq!(json, r#"{"r":2,"c":3}"#);
        let pos: Position = serde_json::from_str(r#"{"r":7,"c":0}"#).unwrap();
        assert_eq!(pos, Position::at(7, 0));
        assert!(serde_json::from_str::<Position>(r#"{"r":9,"c":0}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"r":-1,"c":0}"#).is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Position::at(0, 0).label(), "A1");
        assert_eq!(Position::at(2, 3).label(), "D3");
    }
}
