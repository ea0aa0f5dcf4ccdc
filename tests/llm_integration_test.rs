//! Live oracle tests against real LLM providers.
//!
//! Run with `--features api` and the provider's API key in the environment.

use othello_ai::{LlmClient, LlmConfig, LlmOracle, LlmProvider, MoveOracle};
use strictly_othello::{legal_moves, Board, Player};
use tracing::instrument;

async fn suggest_opening(provider: LlmProvider, key_var: &str, model: &str) {
    dotenvy::dotenv().ok();

    let api_key = std::env::var(key_var).unwrap_or_else(|_| panic!("{key_var} not set"));
    let oracle = LlmOracle::new(LlmClient::new(LlmConfig::new(
        provider,
        api_key,
        model.to_string(),
        150,
    )));

    let board = Board::initial();
    let legal = legal_moves(&board, Player::Black);
    let suggestion = oracle
        .suggest(&board, Player::Black, &legal)
        .await
        .expect("Oracle call failed");

    eprintln!("{} suggested {:?}", oracle.name(), suggestion);
    let position = suggestion.expect("Expected a suggestion");
    assert!(legal.contains(&position), "{position} is not one of {legal:?}");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_gemini_suggests_legal_opening() {
    suggest_opening(LlmProvider::Gemini, "GEMINI_API_KEY", "gemini-2.5-flash").await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_suggests_legal_opening() {
    suggest_opening(
        LlmProvider::Anthropic,
        "ANTHROPIC_API_KEY",
        "claude-3-5-haiku-20241022",
    )
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_suggests_legal_opening() {
    suggest_opening(LlmProvider::OpenAI, "OPENAI_API_KEY", "gpt-4o-mini").await;
}
