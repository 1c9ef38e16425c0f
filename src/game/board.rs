use std::fmt;
use std::str::FromStr;

use super::Player;

/// Side length of the board.
pub const SIZE: usize = 8;
/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// Flat 8x8 board addressed by `row * SIZE + col`, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 64 cells, found {0}")]
    WrongCellCount(usize),

    #[error("unexpected character '{0}' in board diagram")]
    BadChar(char),
}

impl Board {
    /// Create a board with the standard four-disc opening
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.set(27, Player::White);
        board.set(28, Player::Black);
        board.set(35, Player::Black);
        board.set(36, Player::White);
        board
    }

    /// Create a board with no discs on it
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Get the cell at `index`
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Put a disc of `player`'s color at `index`. Callers decide legality.
    pub fn set(&mut self, index: usize, player: Player) {
        self.cells[index] = player.to_cell();
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Disc counts as (black, white)
    pub fn counts(&self) -> (usize, usize) {
        (self.count(Cell::Black), self.count(Cell::White))
    }

    pub fn is_full(&self) -> bool {
        self.count(Cell::Empty) == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a diagram of 64 cells: `B`/`X` black, `W`/`O` white, `.`/`-` empty.
/// Whitespace is ignored, so rows may be laid out on separate lines.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut index = 0;

        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'B' | 'b' | 'X' | 'x' => Cell::Black,
                'W' | 'w' | 'O' | 'o' => Cell::White,
                '.' | '-' => Cell::Empty,
                other => return Err(ParseBoardError::BadChar(other)),
            };
            if index < CELLS {
                board.cells[index] = cell;
            }
            index += 1;
        }

        if index != CELLS {
            return Err(ParseBoardError::WrongCellCount(index));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_opening() {
        let board = Board::new();
        assert_eq!(board.get(27), Cell::White);
        assert_eq!(board.get(28), Cell::Black);
        assert_eq!(board.get(35), Cell::Black);
        assert_eq!(board.get(36), Cell::White);

        for index in (0..CELLS).filter(|i| ![27, 28, 35, 36].contains(i)) {
            assert_eq!(board.get(index), Cell::Empty, "cell {index} should be empty");
        }
        assert_eq!(board.counts(), (2, 2));
    }

    #[test]
    fn test_set_overwrites_without_validation() {
        let mut board = Board::new();
        board.set(27, Player::Black);
        board.set(0, Player::White);
        assert_eq!(board.get(27), Cell::Black);
        assert_eq!(board.get(0), Cell::White);
        assert_eq!(board.counts(), (3, 2));
    }

    #[test]
    fn test_counts_always_sum_to_cells() {
        let board = Board::new();
        let (black, white) = board.counts();
        assert_eq!(black + white + board.count(Cell::Empty), CELLS);
    }

    #[test]
    fn test_parse_diagram_roundtrips_display() {
        let board = Board::new();
        let parsed: Board = board.to_string().parse().unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("B W".parse::<Board>(), Err(ParseBoardError::WrongCellCount(2)));
        let bad = format!("{}?", ".".repeat(63));
        assert_eq!(bad.parse::<Board>(), Err(ParseBoardError::BadChar('?')));
    }

    #[test]
    fn test_full_board() {
        let board: Board = "B".repeat(CELLS).parse().unwrap();
        assert!(board.is_full());
        assert!(!Board::new().is_full());
    }
}
