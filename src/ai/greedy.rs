use crate::game::{rules, Board, GameState, Player};

use super::agent::Agent;

/// Pick the legal placement that flips the most discs right now.
///
/// Ties go to the lowest index. Returns `None` when `player` has no legal
/// move, in which case the caller must pass instead.
pub fn select_move(board: &Board, player: Player) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for index in rules::legal_moves(board, player) {
        let captured = rules::flips(board, player, index).len();
        match best {
            Some((_, most)) if captured <= most => {}
            _ => best = Some((index, captured)),
        }
    }

    best.map(|(index, _)| index)
}

/// Single-ply bot that maximizes immediate captures.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAgent;

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent
    }
}

impl Agent for GreedyAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        select_move(state.board(), state.current_player())
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}
