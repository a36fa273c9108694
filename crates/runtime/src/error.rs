//! Error types raised by the runtime layer.

use thiserror::Error;

/// Errors surfaced by session and persistence operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save data is corrupt: {0}")]
    CorruptSave(#[from] game_core::SaveError),

    #[error("no save directory could be determined")]
    NoSaveDirectory,
}

impl RuntimeError {
    /// True when the error means the save cannot be used but the session
    /// can continue as if no save existed.
    pub fn is_corrupt_save(&self) -> bool {
        matches!(self, Self::Json(_) | Self::CorruptSave(_))
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
