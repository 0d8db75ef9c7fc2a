//! Unified error type surfaced by the runtime API.
//!
//! Wraps failures from the engine, the collaborators, storage and the save
//! format so the shell can bubble them up with consistent context.

use arena_core::state::StateError;
use arena_core::{ErrorSeverity, ExecuteError, GameError, OracleError};
use thiserror::Error;

use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no match in progress")]
    NoActiveGame,

    #[error("session requires a content library before building")]
    MissingContent,

    #[error("character template '{0}' is not a player")]
    NotAPlayerTemplate(String),

    #[error("the player is dead")]
    PlayerDead,

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("save format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save version {found} is not supported (expected {expected})")]
    SaveVersionMismatch { found: u32, expected: u32 },

    #[error("only generated maps can be saved")]
    MissingMapOrigin,

    #[error("corrupted save: {0}")]
    CorruptSave(#[from] StateError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Execute(e) => e.severity(),
            RuntimeError::Oracle(e) => e.severity(),
            RuntimeError::NoActiveGame | RuntimeError::PlayerDead => ErrorSeverity::Validation,
            RuntimeError::Storage(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::NoActiveGame => "RUNTIME_NO_ACTIVE_GAME",
            RuntimeError::MissingContent => "RUNTIME_MISSING_CONTENT",
            RuntimeError::NotAPlayerTemplate(_) => "RUNTIME_NOT_A_PLAYER_TEMPLATE",
            RuntimeError::PlayerDead => "RUNTIME_PLAYER_DEAD",
            RuntimeError::Execute(e) => e.error_code(),
            RuntimeError::Oracle(e) => e.error_code(),
            RuntimeError::Storage(_) => "RUNTIME_STORAGE",
            RuntimeError::Json(_) => "RUNTIME_SAVE_FORMAT",
            RuntimeError::SaveVersionMismatch { .. } => "RUNTIME_SAVE_VERSION_MISMATCH",
            RuntimeError::MissingMapOrigin => "RUNTIME_MISSING_MAP_ORIGIN",
            RuntimeError::CorruptSave(_) => "RUNTIME_CORRUPT_SAVE",
        }
    }
}
