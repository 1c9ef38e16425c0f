use crate::game::Player;
use crate::session::Session;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

pub fn render(frame: &mut Frame, session: &Session, cursor: usize, messages: &[String]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(11),    // Board
            Constraint::Length(6),  // Messages
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, cursor, chunks[1]);
    render_messages(frame, messages, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let state = session.state();
    let (black, white) = state.score();

    let turn = if state.is_finished() {
        "Game Over".to_string()
    } else if state.current_player() == session.human() {
        format!("Your move ({})", session.human().name())
    } else {
        format!("{} is thinking", session.bot_name())
    };
    let color = match state.current_player() {
        Player::Black => Color::Gray,
        Player::White => Color::White,
    };

    let header_text = Line::from(vec![
        Span::styled(turn, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw("  |  "),
        Span::raw(format!("Black {black} - {white} White")),
        Span::raw("  |  "),
        Span::raw(format!("vs {}", session.bot_name())),
    ]);

    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Othello"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, session: &Session, cursor: usize, area: Rect) {
    let state = session.state();
    let legal: &[usize] = if state.current_player() == session.human() {
        state.legal_moves()
    } else {
        &[]
    };

    let lines = board_widget::board_lines(state.board(), legal, Some(cursor));
    let board = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board, area);
}

fn render_messages(frame: &mut Frame, messages: &[String], area: Rect) {
    // newest at the bottom, as many as fit inside the border
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = messages
        .iter()
        .skip(messages.len().saturating_sub(visible))
        .map(|m| Line::from(m.as_str()))
        .collect();

    let widget = Paragraph::new(lines)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("Arrows: Move  |  Tab: Next legal  |  Enter: Place  |  P: Pass  |  N: New  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
