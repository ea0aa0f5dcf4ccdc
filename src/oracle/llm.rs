//! LLM-backed oracle.

use super::{MoveOracle, OracleError};
use crate::llm_client::{LlmClient, ReplySchema};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strictly_othello::{Board, Player, Position};
use tracing::{debug, info, instrument, warn};

const SYSTEM_PROMPT: &str = "You are a strong Othello (Reversi) player. \
You always answer with a single JSON object and nothing else.";

/// Reply shape requested from the model: zero-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestedMove {
    /// Row, 0 at the top.
    pub r: i64,
    /// Column, 0 at the left.
    pub c: i64,
}

impl TryFrom<SuggestedMove> for Position {
    type Error = OracleError;

    fn try_from(reply: SuggestedMove) -> Result<Self, Self::Error> {
        let row = usize::try_from(reply.r).ok();
        let col = usize::try_from(reply.c).ok();
        row.zip(col)
            .and_then(|(row, col)| Position::new(row, col))
            .ok_or_else(|| {
                OracleError::malformed(format!("({},{}) is off the board", reply.r, reply.c))
            })
    }
}

/// Oracle that asks a language model for a move.
///
/// With zero or one legal move the model is not consulted.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: LlmClient,
    name: String,
    schema: ReplySchema,
}

impl LlmOracle {
    /// Creates an oracle around an LLM client.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient) -> Self {
        let name = format!("LLM ({})", client.config().model());
        let schema = ReplySchema {
            name: "othello_move".to_string(),
            schema: serde_json::to_value(schemars::schema_for!(SuggestedMove))
                .unwrap_or_default(),
        };
        info!(%name, "Creating LLM oracle");
        Self {
            client,
            name,
            schema,
        }
    }
}

#[async_trait::async_trait]
impl MoveOracle for LlmOracle {
    #[instrument(skip(self, board, legal), fields(oracle = %self.name, legal = legal.len()))]
    async fn suggest(
        &self,
        board: &Board,
        player: Player,
        legal: &[Position],
    ) -> Result<Option<Position>, OracleError> {
        match legal {
            [] => {
                debug!("No legal moves, nothing to ask");
                return Ok(None);
            }
            [only] => {
                debug!(position = %only, "Single legal move, skipping model");
                return Ok(Some(*only));
            }
            _ => {}
        }

        let prompt = build_prompt(board, player, legal);
        debug!(prompt_length = prompt.len(), "Requesting suggestion");

        let reply = self
            .client
            .generate_structured(SYSTEM_PROMPT, &prompt, Some(&self.schema))
            .await
            .map_err(|e| OracleError::unavailable(e.message))?;

        let position = parse_reply(&reply)?;
        info!(%position, "Model suggested");
        Ok(Some(position))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builds the user prompt for one decision.
pub fn build_prompt(board: &Board, player: Player, legal: &[Position]) -> String {
    let moves = legal
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Board (row 0 at the top, column 0 at the left; B = Black, W = White, . = empty):\n\
         {board}\n\
         You are playing {player} ({glyph}).\n\
         Legal moves as (row,col): {moves}\n\n\
         Guidelines:\n\
         - Corners can never be flipped back; take them when you can.\n\
         - Avoid the squares next to an empty corner (C and X squares) unless you already own that corner.\n\
         - Prefer moves that keep your options open and limit your opponent's replies.\n\
         - Favour stable discs over flipping many discs.\n\n\
         Pick exactly one move from the legal list. \
         Answer with JSON only, in the form {{\"r\": <row>, \"c\": <col>}}.",
        glyph = player.glyph(),
    )
}

/// Extracts the first `{"r": .., "c": ..}` object from a model reply.
///
/// Surrounding prose and code fences are ignored. The position is not
/// checked for legality here.
pub fn parse_reply(reply: &str) -> Result<Position, OracleError> {
    for (start, _) in reply.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&reply[start..]).into_iter::<SuggestedMove>();
        if let Some(Ok(suggested)) = stream.next() {
            return Position::try_from(suggested);
        }
    }
    warn!(reply = %reply, "No move object in reply");
    Err(OracleError::malformed(format!(
        "no {{\"r\",\"c\"}} object in reply: {}",
        reply.trim()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::OracleErrorKind;
    use strictly_othello::legal_moves;

    #[test]
    fn test_parse_plain_json() {
        assert_eq!(parse_reply(r#"{"r": 2, "c": 3}"#).unwrap(), Position::at(2, 3));
    }

    #[test]
    fn test_parse_fenced_json_with_prose() {
        let reply = "Taking the corner.\n```json\n{\"r\":0,\"c\":7}\n```\nGood luck!";
        assert_eq!(parse_reply(reply).unwrap(), Position::at(0, 7));
    }

    #[test]
    fn test_parse_skips_unrelated_braces() {
        let reply = r#"{"thinking": "corner"} then {"r": 5, "c": 4, "why": "mobility"}"#;
        assert_eq!(parse_reply(reply).unwrap(), Position::at(5, 4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_reply("I would play the corner").unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::MalformedResponse);
    }

    #[test]
    fn test_parse_rejects_off_board() {
        let err = parse_reply(r#"{"r": 8, "c": 0}"#).unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::MalformedResponse);
        let err = parse_reply(r#"{"r": -1, "c": 0}"#).unwrap_err();
        assert_eq!(err.kind, OracleErrorKind::MalformedResponse);
    }

    #[test]
    fn test_prompt_lists_board_player_and_moves() {
        let board = Board::initial();
        let legal = legal_moves(&board, Player::Black);
        let prompt = build_prompt(&board, Player::Black, &legal);

        assert!(prompt.contains("...WB..."));
        assert!(prompt.contains("Black (B)"));
        assert!(prompt.contains("(2,3), (3,2), (4,5), (5,4)"));
        assert!(prompt.contains(r#"{"r": <row>, "c": <col>}"#));
    }
}
