//! Error types for grid operations.

/// Errors produced while launching games.
#[derive(Debug, thiserror::Error)]
pub enum GamesError {
    /// The game's file or folder is gone.
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
