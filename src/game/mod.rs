//! Core Othello game logic: board representation, move generation, and the
//! game state machine.

mod board;
mod coord;
mod player;
pub mod rules;
mod state;

pub use board::{Board, Cell, ParseBoardError, CELLS, SIZE};
pub use coord::{format_coord, parse_coord, CoordError};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError};
