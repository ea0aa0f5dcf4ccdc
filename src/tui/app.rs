//! Application state and logic.

use crate::controller::MatchEvent;
use strictly_othello::{MoveSource, Position};
use tracing::debug;

/// UI-side state. Game state lives in the controller.
pub struct App {
    cursor: Position,
    show_hints: bool,
    status_message: String,
    last_move: Option<Position>,
}

impl App {
    /// Creates a new application.
    pub fn new(show_hints: bool) -> Self {
        Self {
            cursor: Position::at(2, 3),
            show_hints,
            status_message: "Black to move".to_string(),
            last_move: None,
        }
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the cursor.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Whether legal moves are highlighted.
    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    /// Flips hint display.
    pub fn toggle_hints(&mut self) {
        self.show_hints = !self.show_hints;
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Replaces the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Reports a placement the controller did not take.
    ///
    /// After game over the result banner stays up.
    pub fn placement_ignored(&mut self, game_over: bool) {
        if !game_over {
            self.status_message = "Wait for your turn".to_string();
        }
    }

    /// The most recently placed disc.
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Handles an event from the controller.
    pub fn handle_event(&mut self, event: MatchEvent) {
        debug!(?event, "Handling match event");

        match event {
            MatchEvent::MoveApplied { action, source } => {
                self.last_move = Some(action.position);
                self.status_message = match source {
                    MoveSource::Human => {
                        format!("{} played {}", action.player, action.position.label())
                    }
                    MoveSource::Automated => {
                        format!("{} (AI) played {}", action.player, action.position.label())
                    }
                };
            }
            MatchEvent::Passed { skipped } => {
                self.status_message = format!("{} has no legal move and passes", skipped);
            }
            MatchEvent::Thinking { player } => {
                self.status_message = format!("{} is thinking...", player);
            }
            MatchEvent::FallbackUsed { position, reason } => {
                self.status_message =
                    format!("AI fell back to {} ({})", position.label(), reason);
            }
            MatchEvent::SuggestionDiscarded { .. } => {}
            MatchEvent::GameOver(outcome) => {
                self.status_message =
                    format!("{}! Press 'r' to restart or 'q' to quit.", outcome);
            }
            MatchEvent::Undone => {
                self.last_move = None;
                self.status_message = "Move undone".to_string();
            }
            MatchEvent::Reset => {
                self.last_move = None;
                self.status_message = "New game. Black to move".to_string();
            }
            MatchEvent::OpponentToggled { enabled } => {
                self.status_message = if enabled {
                    "Playing against the AI".to_string()
                } else {
                    "Two-player mode".to_string()
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_othello::{Move, Outcome, Player};

    #[test]
    fn test_move_event_updates_status() {
        let mut app = App::new(true);
        app.handle_event(MatchEvent::MoveApplied {
            action: Move::new(Player::Black, Position::at(2, 3)),
            source: MoveSource::Human,
        });
        assert_eq!(app.status_message(), "Black played D3");
        assert_eq!(app.last_move(), Some(Position::at(2, 3)));
    }

    #[test]
    fn test_game_over_banner() {
        let mut app = App::new(true);
        app.handle_event(MatchEvent::GameOver(Outcome::Draw));
        assert!(app.status_message().starts_with("Draw!"));
    }

    #[test]
    fn test_placement_after_game_over_keeps_banner() {
        let mut app = App::new(true);
        app.handle_event(MatchEvent::GameOver(Outcome::Draw));
        let banner = app.status_message().to_string();

        app.placement_ignored(true);
        assert_eq!(app.status_message(), banner);

        app.placement_ignored(false);
        assert_eq!(app.status_message(), "Wait for your turn");
    }
}
