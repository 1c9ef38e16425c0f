use crate::game::{format_coord, Board, GameOutcome, GameState, Player};

use super::agent::Agent;

/// One turn of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Place(usize),
    Pass,
}

/// Everything that happened in a game between two agents.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub turns: Vec<(Player, Turn)>,
    pub final_board: Board,
    pub outcome: GameOutcome,
}

impl MatchRecord {
    /// Final disc counts as (black, white)
    pub fn score(&self) -> (usize, usize) {
        self.final_board.counts()
    }

    /// Move list in algebraic notation, `--` for passes
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|(_, turn)| match turn {
                Turn::Place(index) => format_coord(*index),
                Turn::Pass => "--".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Play one full game from the opening. `black` moves first.
///
/// An agent returning an illegal index is a bug in the agent and panics.
pub fn play_match(black: &mut dyn Agent, white: &mut dyn Agent) -> MatchRecord {
    let mut state = GameState::initial();
    let mut turns = Vec::new();

    while !state.is_finished() {
        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };

        match agent.select_action(&state) {
            Some(index) => {
                state.apply_move_mut(index).unwrap_or_else(|err| {
                    panic!(
                        "{} selected {} ({err}); legal: {:?}",
                        agent.name(),
                        format_coord(index),
                        state.legal_moves()
                    )
                });
                turns.push((player, Turn::Place(index)));
            }
            None => {
                state.pass_mut().unwrap_or_else(|err| {
                    panic!("{} passed with moves available ({err})", agent.name())
                });
                turns.push((player, Turn::Pass));
            }
        }
    }

    let outcome = match state.outcome() {
        Some(outcome) => outcome,
        None => unreachable!("loop exits only on a finished game"),
    };

    MatchRecord {
        turns,
        final_board: *state.board(),
        outcome,
    }
}

/// Play `games` games between the same two agents, swapping colours each game.
/// `first` plays Black in even-numbered games. Agents keep their state across
/// games, so a seeded random agent plays a fresh line every time.
pub fn play_series(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    games: usize,
) -> Vec<(Player, MatchRecord)> {
    (0..games)
        .map(|game| {
            if game % 2 == 0 {
                (Player::Black, play_match(&mut *first, &mut *second))
            } else {
                (Player::White, play_match(&mut *second, &mut *first))
            }
        })
        .collect()
}
