use thiserror::Error;

/// Errors that can arise in the game core and its persistence layer.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around IO errors (save file access, seed files, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a seed catalog file cannot be parsed.
    #[error("catalog error in {file}: {message}")]
    Catalog { file: String, message: String },

    /// Returned when loading a save for a player name that is not present.
    #[error("no saved game for player: {0}")]
    SaveNotFound(String),

    /// The save store file does not exist yet.
    #[error("save store missing: {0}")]
    SaveStoreMissing(String),

    /// Prompt input stream closed before a choice could be read.
    #[error("input stream closed")]
    InputClosed,
}
