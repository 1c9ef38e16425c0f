//! Plain-text rendering of the board, written to disk after every action.

use std::path::Path;

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Paragraph, widgets::Widget};

use super::board_widget::board_lines;
use crate::error::SessionError;
use crate::game::Board;

/// Render the board, legal-move markers and score into text.
pub fn render_text(board: &Board, legal: &[usize]) -> String {
    let (black, white) = board.counts();
    let mut lines = board_lines(board, legal, None);
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!("Black {black} - {white} White")));

    let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let area = Rect::new(0, 0, width, lines.len() as u16);
    let mut buffer = Buffer::empty(area);
    Paragraph::new(lines).render(area, &mut buffer);

    let mut text = String::new();
    for row in buffer.content.chunks(area.width.max(1) as usize) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

/// Write the rendered board to `path`, replacing any previous snapshot
pub fn write_snapshot(path: &Path, board: &Board, legal: &[usize]) -> Result<(), SessionError> {
    std::fs::write(path, render_text(board, legal)).map_err(|source| SessionError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_opening() {
        let text = render_text(&Board::new(), &[19, 26, 37, 44]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "   a b c d e f g h");
        assert_eq!(lines[1], " 1 . . . . . . . .");
        assert_eq!(lines[4], " 4 . . \u{b7} \u{25cb} \u{25cf} . . .");
        assert_eq!(lines[5], " 5 . . . \u{25cf} \u{25cb} \u{b7} . .");
        assert_eq!(lines.last(), Some(&"Black 2 - 2 White"));
    }

    #[test]
    fn test_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.txt");
        write_snapshot(&path, &Board::new(), &[]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_text(&Board::new(), &[]));
    }

    #[test]
    fn test_write_snapshot_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("board.txt");
        let err = write_snapshot(&path, &Board::new(), &[]).unwrap_err();
        assert!(matches!(err, SessionError::Snapshot { .. }));
        assert!(err.to_string().contains("board.txt"));
    }
}
