//! Offline oracle behaviour: reply parsing, short-circuits and config wiring.

use othello_ai::{
    oracle_from_config, parse_reply, AppConfig, LlmClient, LlmConfig, LlmOracle, LlmProvider,
    MoveOracle, OracleErrorKind,
};
use strictly_othello::{resolve_suggestion, Board, Player, Position, Resolution};

fn offline_oracle() -> LlmOracle {
    // Invalid key: a real request would fail, so these pass only when the
    // model is skipped.
    LlmOracle::new(LlmClient::new(LlmConfig::new(
        LlmProvider::Gemini,
        "invalid".to_string(),
        "gemini-2.5-flash".to_string(),
        50,
    )))
}

#[tokio::test]
async fn test_no_legal_moves_returns_none_without_calling_model() {
    let board: Board = "
        BBBBBBBB
        BBBBBBBB
        BBBBBBBB
        BBBBBBBB
        BBBBBBBB
        BBBBBBBB
        BBBBBBBB
        BBBBBBBB
    "
    .parse()
    .unwrap();
    let suggestion = offline_oracle()
        .suggest(&board, Player::White, &[])
        .await
        .unwrap();
    assert_eq!(suggestion, None);
}

#[tokio::test]
async fn test_single_legal_move_returned_without_calling_model() {
    let only = Position::at(7, 2);
    let suggestion = offline_oracle()
        .suggest(&Board::initial(), Player::Black, &[only])
        .await
        .unwrap();
    assert_eq!(suggestion, Some(only));
}

#[test]
fn test_parsed_reply_outside_legal_list_falls_back() {
    let legal = vec![Position::at(2, 3), Position::at(3, 2)];
    let parsed = parse_reply("```json\n{\"r\": 0, \"c\": 0}\n```");
    assert_eq!(parsed.as_ref().ok(), Some(&Position::at(0, 0)));

    let resolution = resolve_suggestion(parsed.map(Some), &legal);
    assert!(matches!(
        resolution,
        Resolution::Fallback { position, .. } if position == Position::at(2, 3)
    ));
}

#[test]
fn test_malformed_reply_falls_back() {
    let legal = vec![Position::at(2, 3), Position::at(3, 2)];
    let parsed = parse_reply("Sorry, I can't decide.");
    assert_eq!(
        parsed.as_ref().map_err(|e| e.kind).err(),
        Some(OracleErrorKind::MalformedResponse)
    );
    assert_eq!(
        resolve_suggestion(parsed.map(Some), &legal).position(),
        Some(Position::at(2, 3))
    );
}

#[test]
fn test_oracle_from_config_without_key_uses_fallback() {
    let config = AppConfig::from_toml(
        r#"
        [oracle]
        provider = "openai"
        model = "gpt-4o-mini"
        "#,
    )
    .unwrap();
    if std::env::var("OPENAI_API_KEY").is_ok() {
        return;
    }
    assert_eq!(oracle_from_config(config.oracle()).name(), "Fallback");
}
