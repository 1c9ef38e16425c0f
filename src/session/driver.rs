use std::fmt;
use std::time::Duration;

use crate::ai::Agent;
use crate::game::{format_coord, GameOutcome, GameState, MoveError, Player};

use super::Command;

/// Something the front end should tell the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { human: Player },
    Placed { player: Player, index: usize, flipped: usize, by_bot: bool },
    Passed { player: Player, by_bot: bool },
    Rejected(MoveError),
    NotYourTurn,
    YourTurn,
    MustPass,
    Finished { outcome: GameOutcome, black: usize, white: usize, human: Player },
    Quit,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Started { human } => {
                write!(f, "New game started. You play {}.", human.name())
            }
            SessionEvent::Placed { index, flipped, by_bot, .. } => {
                let who = if *by_bot { "Bot" } else { "You" };
                write!(f, "{who} placed at {} and flipped {flipped}.", format_coord(*index))
            }
            SessionEvent::Passed { by_bot: true, .. } => {
                write!(f, "Bot has no legal move and passes.")
            }
            SessionEvent::Passed { by_bot: false, .. } => write!(f, "You passed."),
            SessionEvent::Rejected(MoveError::NotLegal(index)) => write!(
                f,
                "{} is not a legal move. Pick one of the marked cells.",
                format_coord(*index)
            ),
            SessionEvent::Rejected(MoveError::MustMove) => {
                write!(f, "You still have a legal move, so you cannot pass.")
            }
            SessionEvent::Rejected(MoveError::GameOver) => {
                write!(f, "The game is over. Type 'new' to play again.")
            }
            SessionEvent::NotYourTurn => write!(f, "Wait for the bot to move."),
            SessionEvent::YourTurn => write!(f, "Your turn."),
            SessionEvent::MustPass => {
                write!(f, "You have no legal move. Type 'pass' to continue.")
            }
            SessionEvent::Finished { outcome, black, white, human } => {
                write!(f, "Game over. Black {black} - {white} White. ")?;
                match outcome {
                    GameOutcome::Winner(winner) if winner == human => write!(f, "You win!"),
                    GameOutcome::Winner(_) => write!(f, "The bot wins."),
                    GameOutcome::Draw => write!(f, "It's a draw!"),
                }
            }
            SessionEvent::Quit => write!(f, "Thanks for playing!"),
        }
    }
}

/// Owns the one game in play and sequences human and bot turns.
///
/// Every entry point takes `&mut self`, so callers serialize access by
/// construction.
pub struct Session {
    state: GameState,
    human: Player,
    bot: Box<dyn Agent>,
    think_delay: Duration,
}

impl Session {
    pub fn new(human: Player, bot: Box<dyn Agent>, think_delay: Duration) -> Self {
        Self::with_state(GameState::initial(), human, bot, think_delay)
    }

    /// Resume from an arbitrary position
    pub fn with_state(
        state: GameState,
        human: Player,
        bot: Box<dyn Agent>,
        think_delay: Duration,
    ) -> Self {
        Session {
            state,
            human,
            bot,
            think_delay,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn bot_name(&self) -> &str {
        self.bot.name()
    }

    /// Announce the game and let the bot open if it plays Black.
    pub fn start(&mut self) -> Vec<SessionEvent> {
        let mut events = vec![SessionEvent::Started { human: self.human }];
        self.run_bot(&mut events);
        events.push(self.status());
        events
    }

    /// Process one command, including any bot replies it triggers.
    pub fn handle(&mut self, command: Command) -> Vec<SessionEvent> {
        let mut events = self.submit(command);
        if self.bot_pending() {
            self.run_bot(&mut events);
            events.push(self.status());
        }
        events
    }

    /// Apply only the human side of `command`; bot replies are left pending.
    ///
    /// Front ends that redraw between turns call this and then
    /// [`Session::play_bot_turn`] while [`Session::bot_pending`] holds.
    pub fn submit(&mut self, command: Command) -> Vec<SessionEvent> {
        match command {
            Command::Exit => vec![SessionEvent::Quit],
            Command::NewGame => {
                self.state.restart();
                tracing::info!(human = ?self.human, "game restarted");
                let mut events = vec![SessionEvent::Started { human: self.human }];
                if !self.bot_pending() {
                    events.push(self.status());
                }
                events
            }
            Command::Place(_) | Command::Pass
                if !self.state.is_finished() && self.state.current_player() != self.human =>
            {
                vec![SessionEvent::NotYourTurn]
            }
            Command::Place(index) => match self.state.apply_move_mut(index) {
                Ok(flipped) => {
                    tracing::debug!(coord = %format_coord(index), flipped = flipped.len(), "human placed");
                    self.log_if_finished();
                    let mut events = vec![SessionEvent::Placed {
                        player: self.human,
                        index,
                        flipped: flipped.len(),
                        by_bot: false,
                    }];
                    if !self.bot_pending() {
                        events.push(self.status());
                    }
                    events
                }
                Err(err) => vec![SessionEvent::Rejected(err)],
            },
            Command::Pass => match self.state.pass_mut() {
                Ok(()) => {
                    tracing::debug!("human passed");
                    self.log_if_finished();
                    let mut events = vec![SessionEvent::Passed {
                        player: self.human,
                        by_bot: false,
                    }];
                    if !self.bot_pending() {
                        events.push(self.status());
                    }
                    events
                }
                Err(err) => vec![SessionEvent::Rejected(err)],
            },
        }
    }

    /// Whether the bot is on move in an unfinished game
    pub fn bot_pending(&self) -> bool {
        !self.state.is_finished() && self.state.current_player() != self.human
    }

    /// Let the bot take one turn: a placement, or a pass if it has none.
    /// Returns `None` when it is not the bot's turn.
    pub fn play_bot_turn(&mut self) -> Option<SessionEvent> {
        if !self.bot_pending() {
            return None;
        }

        if !self.think_delay.is_zero() {
            std::thread::sleep(self.think_delay);
        }

        let player = self.state.current_player();
        let choice = self.bot.select_action(&self.state);
        let event = match choice.map(|index| (index, self.state.apply_move_mut(index))) {
            Some((index, Ok(flipped))) => {
                tracing::debug!(bot = self.bot.name(), coord = %format_coord(index), flipped = flipped.len(), "bot placed");
                SessionEvent::Placed {
                    player,
                    index,
                    flipped: flipped.len(),
                    by_bot: true,
                }
            }
            Some((index, Err(err))) => {
                tracing::error!(bot = self.bot.name(), coord = %format_coord(index), %err, "bot chose an illegal move");
                SessionEvent::Rejected(err)
            }
            None => match self.state.pass_mut() {
                Ok(()) => {
                    tracing::debug!(bot = self.bot.name(), "bot passed");
                    SessionEvent::Passed { player, by_bot: true }
                }
                Err(err) => {
                    tracing::error!(bot = self.bot.name(), %err, "bot passed with moves available");
                    SessionEvent::Rejected(err)
                }
            },
        };
        self.log_if_finished();
        Some(event)
    }

    /// Where the game stands for the human: finished, forced pass, or to move.
    pub fn status(&self) -> SessionEvent {
        if let Some(outcome) = self.state.outcome() {
            let (black, white) = self.state.score();
            return SessionEvent::Finished {
                outcome,
                black,
                white,
                human: self.human,
            };
        }
        if self.state.current_player() != self.human {
            return SessionEvent::NotYourTurn;
        }
        if self.state.legal_moves().is_empty() {
            SessionEvent::MustPass
        } else {
            SessionEvent::YourTurn
        }
    }

    /// Called after every successful action; only the one that ends the game logs.
    fn log_if_finished(&self) {
        if let Some(outcome) = self.state.outcome() {
            let (black, white) = self.state.score();
            tracing::info!(black, white, ?outcome, "game finished");
        }
    }

    fn run_bot(&mut self, events: &mut Vec<SessionEvent>) {
        while let Some(event) = self.play_bot_turn() {
            let stalled = matches!(event, SessionEvent::Rejected(_));
            events.push(event);
            if stalled {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GreedyAgent;
    use crate::game::Board;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn session(human: Player) -> Session {
        Session::new(human, Box::new(GreedyAgent::new()), Duration::ZERO)
    }

    fn black_stuck_state() -> GameState {
        let mut board = Board::empty();
        board.set(0, Player::White);
        board.set(1, Player::Black);
        GameState::from_board(board, Player::Black)
    }

    #[test]
    fn test_start_as_black() {
        let mut session = session(Player::Black);
        assert_eq!(
            session.start(),
            vec![SessionEvent::Started { human: Player::Black }, SessionEvent::YourTurn]
        );
    }

    #[test]
    fn test_start_as_white_lets_bot_open() {
        let mut session = session(Player::White);
        let events = session.start();
        assert_eq!(
            events,
            vec![
                SessionEvent::Started { human: Player::White },
                SessionEvent::Placed { player: Player::Black, index: 19, flipped: 1, by_bot: true },
                SessionEvent::YourTurn,
            ]
        );
        assert_eq!(session.state().current_player(), Player::White);
    }

    #[test]
    fn test_human_move_triggers_bot_reply() {
        let mut session = session(Player::Black);
        session.start();

        let events = session.handle(Command::Place(19));
        assert_eq!(
            events,
            vec![
                SessionEvent::Placed { player: Player::Black, index: 19, flipped: 1, by_bot: false },
                SessionEvent::Placed { player: Player::White, index: 18, flipped: 1, by_bot: true },
                SessionEvent::YourTurn,
            ]
        );
        assert_eq!(session.state().score(), (3, 3));
    }

    #[test]
    fn test_illegal_move_leaves_state_alone() {
        let mut session = session(Player::Black);
        let before = session.state().clone();

        let events = session.handle(Command::Place(0));
        assert_eq!(events, vec![SessionEvent::Rejected(MoveError::NotLegal(0))]);
        assert_eq!(session.handle(Command::Pass), vec![SessionEvent::Rejected(MoveError::MustMove)]);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_human_forced_pass_then_bot_finishes() {
        let mut session = Session::with_state(
            black_stuck_state(),
            Player::Black,
            Box::new(GreedyAgent::new()),
            Duration::ZERO,
        );
        assert_eq!(session.status(), SessionEvent::MustPass);
        assert_eq!(
            session.handle(Command::Place(2)),
            vec![SessionEvent::Rejected(MoveError::NotLegal(2))]
        );

        let events = session.handle(Command::Pass);
        assert_eq!(
            events,
            vec![
                SessionEvent::Passed { player: Player::Black, by_bot: false },
                SessionEvent::Placed { player: Player::White, index: 2, flipped: 1, by_bot: true },
                SessionEvent::Finished {
                    outcome: GameOutcome::Winner(Player::White),
                    black: 0,
                    white: 3,
                    human: Player::Black,
                },
            ]
        );
        assert_eq!(
            session.handle(Command::Place(3)),
            vec![SessionEvent::Rejected(MoveError::GameOver)]
        );
    }

    #[test]
    fn test_bot_passes_when_stuck() {
        let mut session = Session::with_state(
            black_stuck_state(),
            Player::White,
            Box::new(GreedyAgent::new()),
            Duration::ZERO,
        );
        let events = session.start();
        assert_eq!(
            events,
            vec![
                SessionEvent::Started { human: Player::White },
                SessionEvent::Passed { player: Player::Black, by_bot: true },
                SessionEvent::YourTurn,
            ]
        );
    }

    #[test]
    fn test_submit_leaves_bot_pending() {
        let mut session = session(Player::Black);
        let events = session.submit(Command::Place(19));
        assert_eq!(events.len(), 1);
        assert!(session.bot_pending());
        assert_eq!(session.submit(Command::Place(18)), vec![SessionEvent::NotYourTurn]);

        assert!(matches!(session.play_bot_turn(), Some(SessionEvent::Placed { by_bot: true, .. })));
        assert!(!session.bot_pending());
        assert_eq!(session.play_bot_turn(), None);
    }

    #[test]
    fn test_new_game_and_exit() {
        let mut session = session(Player::Black);
        session.handle(Command::Place(19));

        let events = session.handle(Command::NewGame);
        assert_eq!(
            events,
            vec![SessionEvent::Started { human: Player::Black }, SessionEvent::YourTurn]
        );
        assert_eq!(session.state(), &GameState::initial());
        assert_eq!(session.handle(Command::Exit), vec![SessionEvent::Quit]);
    }

    #[test]
    fn test_event_messages() {
        let placed = SessionEvent::Placed { player: Player::White, index: 18, flipped: 2, by_bot: true };
        assert_eq!(placed.to_string(), "Bot placed at c3 and flipped 2.");

        let finished = SessionEvent::Finished {
            outcome: GameOutcome::Draw,
            black: 32,
            white: 32,
            human: Player::Black,
        };
        assert_eq!(finished.to_string(), "Game over. Black 32 - 32 White. It's a draw!");
    }

    #[test]
    fn test_finish_is_logged_once() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut session = Session::with_state(
                black_stuck_state(),
                Player::Black,
                Box::new(GreedyAgent::new()),
                Duration::ZERO,
            );
            session.handle(Command::Pass);
            session.status();
            session.status();
            session.handle(Command::Place(3));
            session.handle(Command::Pass);
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("game finished").count(), 1);
    }
}
