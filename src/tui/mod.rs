//! Terminal UI for Strictly Othello.

mod app;
mod input;
mod ui;

use crate::controller::{MatchController, MatchEvent, MatchSettings};
use crate::oracle::MoveOracle;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use strictly_othello::MoveError;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use app::App;
use input::Command;

/// Runs an interactive match in the terminal.
pub async fn run_tui(
    oracle: Arc<dyn MoveOracle>,
    settings: MatchSettings,
    show_hints: bool,
) -> Result<()> {
    info!("Starting Strictly Othello TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut controller = MatchController::new(oracle, settings, event_tx);
    let mut app = App::new(show_hints);

    let res = run_match(&mut terminal, &mut controller, &mut app, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[instrument(skip_all)]
async fn run_match<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut MatchController,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<MatchEvent>,
) -> Result<()> {
    controller.start();

    loop {
        controller.poll();
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, app, controller))?;

        if !event::poll(Duration::from_millis(50))? {
            // Let the oracle task make progress on single-threaded runtimes.
            tokio::task::yield_now().await;
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(command) = input::command_for(key.code, app.cursor()) else {
            continue;
        };

        match command {
            Command::Quit => {
                info!("User quit");
                return Ok(());
            }
            Command::Cursor(pos) => app.set_cursor(pos),
            Command::Place => match controller.attempt_move(app.cursor()) {
                Ok(true) => {}
                Ok(false) => app.placement_ignored(controller.session().is_over()),
                Err(MoveError::IllegalPosition(pos)) => {
                    app.set_status(format!("{} is not a legal move", pos.label()));
                }
                Err(e) => {
                    warn!(error = %e, "Move rejected");
                    app.set_status(e.to_string());
                }
            },
            Command::Undo => {
                if !controller.undo() {
                    app.set_status("Nothing to undo");
                }
            }
            Command::Reset => controller.reset(),
            Command::ToggleOpponent => controller.toggle_opponent(),
            Command::ToggleHints => app.toggle_hints(),
        }
    }
}
