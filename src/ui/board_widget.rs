use crate::game::{Board, Cell, SIZE};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const COLUMN_LABELS: &str = "abcdefgh";

/// Board as styled lines: a column header, then one line per row with its
/// row number. Legal moves are marked with a dot; `cursor` is highlighted.
pub fn board_lines(board: &Board, legal: &[usize], cursor: Option<usize>) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(SIZE + 1);

    let mut header = vec![Span::raw("   ")];
    for label in COLUMN_LABELS.chars() {
        header.push(Span::styled(format!("{label} "), Style::default().fg(Color::Gray)));
    }
    lines.push(Line::from(header));

    for row in 0..SIZE {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row + 1),
            Style::default().fg(Color::Gray),
        )];

        for col in 0..SIZE {
            let index = row * SIZE + col;
            let (symbol, mut style) = match board.get(index) {
                Cell::Black => ("\u{25cf}", Style::default().fg(Color::Black).bg(Color::Green)),
                Cell::White => ("\u{25cb}", Style::default().fg(Color::White).bg(Color::Green)),
                Cell::Empty if legal.contains(&index) => {
                    ("\u{00b7}", Style::default().fg(Color::Yellow).bg(Color::Green))
                }
                Cell::Empty => (".", Style::default().fg(Color::DarkGray).bg(Color::Green)),
            };
            if cursor == Some(index) {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
            spans.push(Span::raw(" "));
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Move a cursor index one step, clamped to the board
pub fn step_cursor(cursor: usize, d_row: isize, d_col: isize) -> usize {
    let row = (cursor / SIZE) as isize + d_row;
    let col = (cursor % SIZE) as isize + d_col;
    let last = SIZE as isize - 1;
    (row.clamp(0, last) * SIZE as isize + col.clamp(0, last)) as usize
}

/// The first legal move after `cursor`, wrapping around
pub fn next_legal(cursor: usize, legal: &[usize]) -> Option<usize> {
    legal
        .iter()
        .copied()
        .find(|&index| index > cursor)
        .or_else(|| legal.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_lines_shape() {
        let lines = board_lines(&Board::new(), &[19, 26, 37, 44], None);
        assert_eq!(lines.len(), SIZE + 1);
        assert_eq!(lines[0].to_string().trim_end(), "   a b c d e f g h");
        assert_eq!(lines[3].to_string().trim_end(), " 3 . . . \u{b7} . . . .");
        assert_eq!(lines[4].to_string().trim_end(), " 4 . . \u{b7} \u{25cb} \u{25cf} . . .");
    }

    #[test]
    fn test_cursor_is_highlighted() {
        let lines = board_lines(&Board::new(), &[], Some(0));
        let cell = &lines[1].spans[1];
        assert!(cell.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_step_cursor_clamps() {
        assert_eq!(step_cursor(0, -1, -1), 0);
        assert_eq!(step_cursor(0, 1, 1), 9);
        assert_eq!(step_cursor(7, 0, 1), 7);
        assert_eq!(step_cursor(63, 1, 0), 63);
    }

    #[test]
    fn test_next_legal_wraps() {
        let legal = [19, 26, 37, 44];
        assert_eq!(next_legal(0, &legal), Some(19));
        assert_eq!(next_legal(26, &legal), Some(37));
        assert_eq!(next_legal(44, &legal), Some(19));
        assert_eq!(next_legal(10, &[]), None);
    }
}
