//! Offline oracle: corner first, otherwise the first legal move.

use super::{MoveOracle, OracleError};
use strictly_othello::{fallback_move, Board, Player, Position};
use tracing::debug;

/// Oracle that never calls out; it applies the fallback policy directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackOracle;

#[async_trait::async_trait]
impl MoveOracle for FallbackOracle {
    async fn suggest(
        &self,
        _board: &Board,
        player: Player,
        legal: &[Position],
    ) -> Result<Option<Position>, OracleError> {
        let choice = fallback_move(legal);
        debug!(%player, ?choice, "Fallback oracle chose");
        Ok(choice)
    }

    fn name(&self) -> &str {
        "Fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_othello::legal_moves;

    #[tokio::test]
    async fn test_fallback_oracle_prefers_corner() {
        let legal = vec![Position::at(0, 3), Position::at(7, 7)];
        let choice = FallbackOracle
            .suggest(&Board::initial(), Player::White, &legal)
            .await
            .unwrap();
        assert_eq!(choice, Some(Position::at(7, 7)));
    }

    #[tokio::test]
    async fn test_fallback_oracle_opening() {
        let board = Board::initial();
        let legal = legal_moves(&board, Player::Black);
        let choice = FallbackOracle
            .suggest(&board, Player::Black, &legal)
            .await
            .unwrap();
        assert_eq!(choice, legal.first().copied());
    }
}
