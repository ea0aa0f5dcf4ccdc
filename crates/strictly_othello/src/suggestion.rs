//! Validation of externally suggested moves.
//!
//! The suggestion oracle is untrusted: whatever it returns is checked
//! against the exact legal-move list before it is allowed near the
//! session. Anything else is replaced by a deterministic fallback.

use super::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Why the fallback rule picked the move instead of the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum FallbackReason {
    /// The oracle answered with "no suggestion".
    #[display("oracle gave no suggestion")]
    NoSuggestion,
    /// The oracle named a position outside the legal-move list.
    #[display("oracle suggested {} which is not legal", _0)]
    NotLegal(Position),
    /// The oracle call failed.
    #[display("oracle failed: {}", _0)]
    OracleFailed(String),
}

/// The move chosen for an automated turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The oracle's suggestion passed validation.
    Suggested(Position),
    /// The fallback rule chose the move.
    Fallback {
        /// The substitute move.
        position: Position,
        /// Why the suggestion was not used.
        reason: FallbackReason,
    },
    /// There was no legal move to choose from.
    NoMove,
}

impl Resolution {
    /// The chosen position, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            Resolution::Suggested(position) | Resolution::Fallback { position, .. } => {
                Some(*position)
            }
            Resolution::NoMove => None,
        }
    }
}

/// Keeps a suggestion only if it is a member of `legal`.
pub fn validate_suggestion(suggestion: Option<Position>, legal: &[Position]) -> Option<Position> {
    suggestion.filter(|pos| legal.contains(pos))
}

/// Deterministic default: the first legal corner, else the first legal move.
///
/// `legal` is expected in row-major order, so ties resolve the same way
/// every time.
pub fn fallback_move(legal: &[Position]) -> Option<Position> {
    legal
        .iter()
        .copied()
        .find(|pos| pos.is_corner())
        .or_else(|| legal.first().copied())
}

/// Folds an oracle answer into a move that is guaranteed to be legal.
#[instrument(skip(result, legal), fields(legal = legal.len()))]
pub fn resolve_suggestion<E: std::fmt::Display>(
    result: Result<Option<Position>, E>,
    legal: &[Position],
) -> Resolution {
    let reason = match result {
        Ok(suggestion) => match validate_suggestion(suggestion, legal) {
            Some(position) => {
                debug!(%position, "Suggestion accepted");
                return Resolution::Suggested(position);
            }
            None => match suggestion {
                Some(position) => FallbackReason::NotLegal(position),
                None => FallbackReason::NoSuggestion,
            },
        },
        Err(e) => FallbackReason::OracleFailed(e.to_string()),
    };

    match fallback_move(legal) {
        Some(position) => {
            warn!(%reason, %position, "Using fallback move");
            Resolution::Fallback { position, reason }
        }
        None => Resolution::NoMove,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_prefers_corner_over_first() {
        let legal = vec![Position::at(0, 3), Position::at(2, 2), Position::at(7, 7)];
        assert_eq!(fallback_move(&legal), Some(Position::at(7, 7)));
    }

    #[test]
    fn test_fallback_first_move_without_corner() {
        let legal = vec![Position::at(2, 3), Position::at(3, 2)];
        assert_eq!(fallback_move(&legal), Some(Position::at(2, 3)));
        assert_eq!(fallback_move(&[]), None);
    }

    #[test]
    fn test_invalid_suggestion_falls_back_to_corner() {
        let legal = vec![Position::at(1, 5), Position::at(0, 7), Position::at(6, 1)];
        let resolution = resolve_suggestion::<String>(Ok(Some(Position::at(4, 4))), &legal);
        assert_eq!(
            resolution,
            Resolution::Fallback {
                position: Position::at(0, 7),
                reason: FallbackReason::NotLegal(Position::at(4, 4)),
            }
        );
    }

    #[test]
    fn test_valid_suggestion_is_kept() {
        let legal = vec![Position::at(0, 0), Position::at(2, 3)];
        let resolution = resolve_suggestion::<String>(Ok(Some(Position::at(2, 3))), &legal);
        assert_eq!(resolution, Resolution::Suggested(Position::at(2, 3)));
    }

    #[test]
    fn test_oracle_error_and_silence_fall_back() {
        let legal = vec![Position::at(2, 3)];
        let failed = resolve_suggestion(Err("timeout"), &legal);
        assert_eq!(failed.position(), Some(Position::at(2, 3)));
        assert!(matches!(
            failed,
            Resolution::Fallback {
                reason: FallbackReason::OracleFailed(_),
                ..
            }
        ));

        let silent = resolve_suggestion::<String>(Ok(None), &legal);
        assert!(matches!(
            silent,
            Resolution::Fallback {
                reason: FallbackReason::NoSuggestion,
                ..
            }
        ));
    }

    #[test]
    fn test_no_legal_moves() {
        assert_eq!(
            resolve_suggestion::<String>(Ok(Some(Position::at(0, 0))), &[]),
            Resolution::NoMove
        );
    }
}
