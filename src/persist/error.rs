use thiserror::Error;

/// Errors that can occur when loading a saved game.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unknown game '{0}'")]
    UnknownGame(String),

    #[error("document is for '{found}', expected '{expected}'")]
    WrongGame {
        expected: &'static str,
        found: String,
    },

    #[error("pile '{key}' has unknown kind '{kind}'")]
    UnknownPileKind { key: String, kind: String },

    #[error("{game} has no '{kind}' piles (pile '{key}')")]
    UnsupportedPile {
        game: &'static str,
        key: String,
        kind: String,
    },

    #[error("document has pile '{0}', which the game does not define")]
    UnknownPile(String),

    #[error("document is missing pile '{0}'")]
    MissingPile(&'static str),

    #[error("pile '{key}' should be '{expected}', document says '{found}'")]
    PileMismatch {
        key: &'static str,
        expected: &'static str,
        found: String,
    },

    /// The blob could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("no saved game under '{0}'")]
    NotFound(String),
}
