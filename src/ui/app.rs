use std::path::PathBuf;

use crate::error::SessionError;
use crate::session::{Command, Session, SessionEvent};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::board_widget::{next_legal, step_cursor};
use super::snapshot;

const MAX_MESSAGES: usize = 50;

pub struct App {
    session: Session,
    cursor: usize,
    should_quit: bool,
    messages: Vec<String>,
    snapshot_path: Option<PathBuf>,
}

impl App {
    pub fn new(session: Session, snapshot_path: Option<PathBuf>) -> Self {
        let cursor = session.state().legal_moves().first().copied().unwrap_or(0);
        App {
            session,
            cursor,
            should_quit: false,
            messages: Vec::new(),
            snapshot_path,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), SessionError>
    where
        B::Error: Into<io::Error>,
    {
        let events = self.session.start();
        self.record(events);
        self.write_snapshot()?;

        loop {
            self.draw(terminal)?;

            if self.should_quit {
                break;
            }

            self.handle_events(terminal)?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        terminal
            .draw(|f| super::game_view::render(f, &self.session, self.cursor, &self.messages))
            .map(|_| ())
            .map_err(Into::into)
    }

    /// Handle keyboard events
    fn handle_events<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), SessionError>
    where
        B::Error: Into<io::Error>,
    {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = self.handle_key(key) {
                        self.dispatch(command, terminal)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Map a key press to cursor movement or a session command
    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Exit),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Tab => {
                if let Some(index) = next_legal(self.cursor, self.session.state().legal_moves()) {
                    self.cursor = index;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Place(self.cursor)),
            KeyCode::Char('p') => Some(Command::Pass),
            KeyCode::Char('n') | KeyCode::Char('r') => Some(Command::NewGame),
            _ => None,
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) -> Option<Command> {
        self.cursor = step_cursor(self.cursor, d_row, d_col);
        None
    }

    /// Run the human command, then the bot's replies with a redraw before each
    fn dispatch<B: Backend>(
        &mut self,
        command: Command,
        terminal: &mut Terminal<B>,
    ) -> Result<(), SessionError>
    where
        B::Error: Into<io::Error>,
    {
        let events = self.session.submit(command);
        self.record(events);

        if self.session.bot_pending() {
            while self.session.bot_pending() {
                self.messages.push(format!("{} is thinking...", self.session.bot_name()));
                self.draw(terminal)?;
                if let Some(event) = self.session.play_bot_turn() {
                    let stalled = matches!(event, SessionEvent::Rejected(_));
                    self.record(vec![event]);
                    if stalled {
                        break;
                    }
                }
            }
            let status = self.session.status();
            self.record(vec![status]);
        }

        if let Some(&first) = self.session.state().legal_moves().first() {
            if !self.session.state().legal_moves().contains(&self.cursor) {
                self.cursor = first;
            }
        }
        self.write_snapshot()
    }

    fn record(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            if event == SessionEvent::Quit {
                self.should_quit = true;
            }
            self.messages.push(event.to_string());
        }
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    fn write_snapshot(&self) -> Result<(), SessionError> {
        match &self.snapshot_path {
            Some(path) => {
                let state = self.session.state();
                snapshot::write_snapshot(path, state.board(), state.legal_moves())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GreedyAgent;
    use crate::game::Player;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn app() -> App {
        let session = Session::new(Player::Black, Box::new(GreedyAgent::new()), Duration::ZERO);
        App::new(session, None)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_starts_on_first_legal_move() {
        assert_eq!(app().cursor, 19);
    }

    #[test]
    fn test_keys_map_to_commands() {
        let mut app = app();
        assert_eq!(app.handle_key(press(KeyCode::Enter)), Some(Command::Place(19)));
        assert_eq!(app.handle_key(press(KeyCode::Char('p'))), Some(Command::Pass));
        assert_eq!(app.handle_key(press(KeyCode::Char('n'))), Some(Command::NewGame));
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Some(Command::Exit));
    }

    #[test]
    fn test_arrow_and_tab_move_cursor() {
        let mut app = app();
        assert_eq!(app.handle_key(press(KeyCode::Down)), None);
        assert_eq!(app.cursor, 27);
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.cursor, 26);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.cursor, 37);
    }

    #[test]
    fn test_quit_event_sets_flag() {
        let mut app = app();
        app.record(vec![SessionEvent::Quit]);
        assert!(app.should_quit);
        assert_eq!(app.messages, vec!["Thanks for playing!".to_string()]);
    }
}
