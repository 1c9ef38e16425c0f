use std::path::PathBuf;

/// Errors that end a play session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write board snapshot to {path}: {source}")]
    Snapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_error_display() {
        let err = SessionError::Snapshot {
            path: PathBuf::from("out/othello.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write board snapshot to out/othello.txt: no such directory"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bot.think_delay_ms must be <= 10000".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: bot.think_delay_ms must be <= 10000"
        );
    }
}
