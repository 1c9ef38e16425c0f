use super::board::{CELLS, SIZE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("coordinate '{0}' must be a column letter followed by a row digit, e.g. d3")]
    Malformed(String),

    #[error("column '{0}' is outside a-h")]
    BadColumn(char),

    #[error("row '{0}' is outside 1-8")]
    BadRow(char),
}

/// Parse algebraic notation ("d3") into a board index.
///
/// Column `a` is 0 and row `1` is the top row, so "d3" is index 19.
pub fn parse_coord(input: &str) -> Result<usize, CoordError> {
    let text = input.trim().to_ascii_lowercase();
    let mut chars = text.chars();
    let (Some(col_ch), Some(row_ch), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(CoordError::Malformed(input.trim().to_string()));
    };

    if !('a'..='h').contains(&col_ch) {
        return Err(CoordError::BadColumn(col_ch));
    }
    if !('1'..='8').contains(&row_ch) {
        return Err(CoordError::BadRow(row_ch));
    }

    let col = (col_ch as u8 - b'a') as usize;
    let row = (row_ch as u8 - b'1') as usize;
    Ok(row * SIZE + col)
}

/// Format a board index as algebraic notation. Off-board indices come back
/// as the bare number.
pub fn format_coord(index: usize) -> String {
    if index >= CELLS {
        return index.to_string();
    }
    let col = (b'a' + (index % SIZE) as u8) as char;
    let row = index / SIZE + 1;
    format!("{col}{row}")
}
