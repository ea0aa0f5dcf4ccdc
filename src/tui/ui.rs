//! Stateless UI rendering for Othello.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use strictly_othello::{Cell, GameSession, Player, Position, BOARD_SIZE};

use super::app::App;
use crate::controller::MatchController;

const CELL_WIDTH: u16 = 4;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App, controller: &MatchController) {
    let area = frame.area();
    let session = controller.session();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(12),   // Board + sidebar
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Strictly Othello")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(chunks[1]);

    draw_board(frame, body[0], app, session);
    draw_sidebar(frame, body[1], app, controller);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    if let Some(outcome) = session.outcome() {
        let score = session.score();
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                outcome.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Black {}  White {}", score.black, score.white)),
            Line::from("r: play again   q: quit"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().title("Game over").borders(Borders::ALL));
        let popup = center_rect(area, 30, 5);
        frame.render_widget(Clear, popup);
        frame.render_widget(banner, popup);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, session: &GameSession) {
    let width = CELL_WIDTH * BOARD_SIZE as u16 + 3;
    let height = BOARD_SIZE as u16 + 1;
    let board_area = center_rect(area, width, height);

    let hints = if app.show_hints() {
        session.legal_moves()
    } else {
        Vec::new()
    };

    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);

    let mut header = vec![Span::raw("   ")];
    for col in 0..BOARD_SIZE {
        let letter = (b'A' + col as u8) as char;
        header.push(Span::styled(
            format!(" {}  ", letter),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(header));

    for row in 0..BOARD_SIZE {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row + 1),
            Style::default().fg(Color::DarkGray),
        )];
        for col in 0..BOARD_SIZE {
            let pos = Position::at(row, col);
            spans.push(cell_span(session, pos, app, hints.contains(&pos)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), board_area);
}

fn cell_span(session: &GameSession, pos: Position, app: &App, hinted: bool) -> Span<'static> {
    let felt = Style::default().bg(Color::Green);
    let (symbol, style) = match session.board().get(pos) {
        Cell::Occupied(Player::Black) => (
            " ●  ",
            felt.fg(Color::Black).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Player::White) => (
            " ●  ",
            felt.fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty if hinted => (" ·  ", felt.fg(Color::Yellow)),
        Cell::Empty => ("    ", felt),
    };

    let style = if pos == app.cursor() {
        style.bg(Color::LightBlue)
    } else if Some(pos) == app.last_move() {
        style.bg(Color::LightGreen)
    } else {
        style
    };

    Span::styled(symbol, style)
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App, controller: &MatchController) {
    let session = controller.session();
    let score = session.score();

    let turn = match session.to_move() {
        Some(player) if controller.is_thinking() => format!("{} (thinking...)", player),
        Some(player) => player.to_string(),
        None => "-".to_string(),
    };
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    let lines = vec![
        Line::from(Span::styled(
            "Score",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("  Black: {}", score.black)),
        Line::from(format!("  White: {}", score.white)),
        Line::from(""),
        Line::from(format!("To move: {}", turn)),
        Line::from(format!(
            "AI ({}): {}",
            controller.settings().opponent,
            on_off(controller.opponent_enabled())
        )),
        Line::from(format!("Hints: {}", on_off(app.show_hints()))),
        Line::from(""),
        Line::from("arrows/hjkl  move"),
        Line::from("enter/space  place"),
        Line::from("u undo   r restart"),
        Line::from("a AI     t hints"),
        Line::from("q quit"),
    ];

    let panel = Paragraph::new(lines).block(Block::default().title("Match").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
