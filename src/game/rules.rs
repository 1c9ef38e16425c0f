//! Move generation. Every function here is pure: it reads a board and returns
//! freshly computed indices.

use super::board::{Board, Cell, CELLS, SIZE};
use super::Player;

/// A compass direction as a flat index delta plus its column step.
///
/// The column step is what stops a ray at the board's left or right edge;
/// the delta alone would wrap onto the neighbouring row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub delta: isize,
    pub col_step: isize,
}

/// Scan order for rays. Flip lists come out in this order.
pub const DIRECTIONS: [Direction; 8] = [
    Direction { delta: -9, col_step: -1 },
    Direction { delta: -8, col_step: 0 },
    Direction { delta: -7, col_step: 1 },
    Direction { delta: -1, col_step: -1 },
    Direction { delta: 1, col_step: 1 },
    Direction { delta: 7, col_step: -1 },
    Direction { delta: 8, col_step: 0 },
    Direction { delta: 9, col_step: 1 },
];

impl Direction {
    /// The next index along this direction, or `None` if the step leaves the board.
    pub fn step(self, index: usize) -> Option<usize> {
        let col = index % SIZE;
        if (self.col_step < 0 && col == 0) || (self.col_step > 0 && col == SIZE - 1) {
            return None;
        }
        let next = index as isize + self.delta;
        if (0..CELLS as isize).contains(&next) {
            Some(next as usize)
        } else {
            None
        }
    }
}

/// Opponent discs that `player` would capture by placing at `index`.
///
/// Empty when the move is illegal, including when `index` is occupied or off
/// the board.
pub fn flips(board: &Board, player: Player, index: usize) -> Vec<usize> {
    if index >= CELLS || board.get(index) != Cell::Empty {
        return Vec::new();
    }

    let own = player.to_cell();
    let opponent = player.other().to_cell();
    let mut captured = Vec::new();

    for dir in DIRECTIONS {
        let mut run = Vec::new();
        let mut current = dir.step(index);

        while let Some(at) = current {
            match board.get(at) {
                cell if cell == opponent => run.push(at),
                cell if cell == own => {
                    captured.append(&mut run);
                    break;
                }
                _ => break,
            }
            current = dir.step(at);
        }
    }

    captured
}

/// Whether placing at `index` captures at least one disc
pub fn is_legal(board: &Board, player: Player, index: usize) -> bool {
    !flips(board, player, index).is_empty()
}

/// All legal placements for `player`, ascending by index. May be empty.
pub fn legal_moves(board: &Board, player: Player) -> Vec<usize> {
    (0..CELLS)
        .filter(|&index| board.get(index) == Cell::Empty && is_legal(board, player, index))
        .collect()
}
