use super::{rules, Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{} is not a legal move", display_coord(.0))]
    NotLegal(usize),

    #[error("cannot pass while a legal move exists")]
    MustMove,

    #[error("the game is over")]
    GameOver,
}

fn display_coord(index: &usize) -> String {
    super::format_coord(*index)
}

/// The single mutable game value: board, side to move, and the side to move's
/// legal placements. The cache is only ever replaced, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    legal_moves: Vec<usize>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Start from an arbitrary position with `to_move` on turn
    pub fn from_board(board: Board, to_move: Player) -> Self {
        GameState {
            legal_moves: rules::legal_moves(&board, to_move),
            board,
            current_player: to_move,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Legal placements for the current player, ascending
    pub fn legal_moves(&self) -> &[usize] {
        &self.legal_moves
    }

    /// Disc counts as (black, white)
    pub fn score(&self) -> (usize, usize) {
        self.board.counts()
    }

    /// True when neither side can place on the current board
    pub fn is_finished(&self) -> bool {
        self.legal_moves.is_empty()
            && rules::legal_moves(&self.board, self.current_player.other()).is_empty()
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_finished() {
            return None;
        }

        let (black, white) = self.score();
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameOutcome::Winner(Player::Black),
            std::cmp::Ordering::Less => GameOutcome::Winner(Player::White),
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        })
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, index: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(index)?;
        Ok(next)
    }

    /// Place for the current player at `index`, returning the flipped discs
    pub fn apply_move_mut(&mut self, index: usize) -> Result<Vec<usize>, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameOver);
        }
        if !self.legal_moves.contains(&index) {
            return Err(MoveError::NotLegal(index));
        }

        let player = self.current_player;
        let flipped = rules::flips(&self.board, player, index);
        self.board.set(index, player);
        for &at in &flipped {
            self.board.set(at, player);
        }

        self.hand_over();
        Ok(flipped)
    }

    /// Pass and return new state (immutable)
    pub fn pass(&self) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.pass_mut()?;
        Ok(next)
    }

    /// Give the turn away. Only allowed when the current player has no move.
    pub fn pass_mut(&mut self) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameOver);
        }
        if !self.legal_moves.is_empty() {
            return Err(MoveError::MustMove);
        }

        self.hand_over();
        Ok(())
    }

    /// Back to the opening with Black to move
    pub fn restart(&mut self) {
        *self = GameState::initial();
    }

    fn hand_over(&mut self) {
        self.current_player = self.current_player.other();
        self.legal_moves = rules::legal_moves(&self.board, self.current_player);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
