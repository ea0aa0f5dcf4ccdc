//! Keyboard handling.

use crossterm::event::KeyCode;
use strictly_othello::{Position, BOARD_SIZE};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor to a new cell.
    Cursor(Position),
    /// Place a disc at the cursor.
    Place,
    /// Undo the last move.
    Undo,
    /// Restart the match.
    Reset,
    /// Switch the automated opponent on or off.
    ToggleOpponent,
    /// Show or hide legal-move hints.
    ToggleHints,
    /// Leave the program.
    Quit,
}

/// Maps a key to a command, given the current cursor.
pub fn command_for(key: KeyCode, cursor: Position) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Cursor(move_cursor(cursor, -1, 0))),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Cursor(move_cursor(cursor, 1, 0))),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Cursor(move_cursor(cursor, 0, -1))),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Cursor(move_cursor(cursor, 0, 1))),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Place),
        KeyCode::Char('u') => Some(Command::Undo),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('a') => Some(Command::ToggleOpponent),
        KeyCode::Char('t') => Some(Command::ToggleHints),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Moves the cursor one cell, stopping at the edges.
pub fn move_cursor(cursor: Position, dr: isize, dc: isize) -> Position {
    let clamp = |value: usize, delta: isize| {
        value
            .saturating_add_signed(delta)
            .min(BOARD_SIZE - 1)
    };
    Position::at(clamp(cursor.row(), dr), clamp(cursor.col(), dc))
}
