use crate::game::{parse_coord, CoordError};

/// A line of user input, understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Pass,
    NewGame,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{input}': {source}")]
    Unknown { input: String, source: CoordError },
}

impl Command {
    /// Parse one input line. Case and surrounding whitespace are ignored.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let input = line.trim().to_ascii_lowercase();
        match input.as_str() {
            "" => Err(CommandError::Empty),
            "exit" | "quit" | "keluar" => Ok(Command::Exit),
            "new" => Ok(Command::NewGame),
            "pass" => Ok(Command::Pass),
            other => parse_coord(other)
                .map(Command::Place)
                .map_err(|source| CommandError::Unknown {
                    input: other.to_string(),
                    source,
                }),
        }
    }
}
