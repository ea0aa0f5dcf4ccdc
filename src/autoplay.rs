//! Headless match with the oracle playing both sides.

use crate::controller::{MatchController, MatchEvent, MatchSettings};
use crate::oracle::MoveOracle;
use std::sync::Arc;
use strictly_othello::{Outcome, Score};
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Result of a finished headless match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayReport {
    /// Final outcome.
    pub outcome: Outcome,
    /// Final disc count.
    pub score: Score,
    /// Moves played (passes excluded).
    pub moves: usize,
    /// Automated moves where the fallback rule replaced the oracle.
    pub fallbacks: usize,
}

/// Plays a full match with both sides automated.
///
/// When `verbose` is set the board is printed after every move.
#[instrument(skip(oracle, settings), fields(oracle = %oracle.name()))]
pub async fn run_autoplay(
    oracle: Arc<dyn MoveOracle>,
    settings: MatchSettings,
    verbose: bool,
) -> AutoplayReport {
    let settings = MatchSettings {
        black_automated: true,
        white_automated: true,
        ..settings
    };
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut controller = MatchController::new(oracle, settings, event_tx);

    controller.start();
    let mut moves = 0;
    let mut fallbacks = 0;

    loop {
        let progressed = controller.next_reply().await;
        while let Ok(event) = event_rx.try_recv() {
            match event {
                MatchEvent::MoveApplied { action, .. } => {
                    moves += 1;
                    if verbose {
                        println!("{}. {}\n{}\n", moves, action, controller.session().board());
                    }
                }
                MatchEvent::Passed { skipped } if verbose => println!("{} passes\n", skipped),
                MatchEvent::FallbackUsed { .. } => fallbacks += 1,
                _ => {}
            }
        }
        if !progressed {
            break;
        }
    }

    let session = controller.session();
    let score = session.score();
    let outcome = session
        .outcome()
        .unwrap_or_else(|| strictly_othello::rules::outcome_for(score));
    info!(%outcome, %score, moves, fallbacks, "Autoplay finished");

    AutoplayReport {
        outcome,
        score,
        moves,
        fallbacks,
    }
}
