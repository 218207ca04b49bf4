use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The movie database has no match for the requested title.
    #[error("No movie found for title '{0}'")]
    NotFound(String),

    /// Network failure, non-success HTTP status, or an API-level error such as a bad key.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The persisted collection exists but could not be parsed.
    #[error("Corrupt data file {}: {reason}", path.display())]
    CorruptData { path: PathBuf, reason: String },

    #[error("Movie '{0}' already exists")]
    Duplicate(String),

    #[error("Movie '{0}' does not exist")]
    MovieNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The API reported success but the payload could not be turned into a movie.
    #[error("Invalid response from movie database: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn corrupt<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::CorruptData {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
