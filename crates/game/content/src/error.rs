//! Content validation errors.

use arena_core::{ErrorSeverity, GameError};

/// Problems found while assembling a template library.
///
/// These are authoring bugs in the data files; the engine never recovers from them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("character template '{0}' defined twice")]
    DuplicateCharacter(String),

    #[error("skill template '{0}' defined twice")]
    DuplicateSkill(String),

    #[error("character template '{character}' references unknown skill '{skill}'")]
    MissingSkill { character: String, skill: String },

    #[error("character template '{name}' is invalid: {reason}")]
    InvalidCharacter { name: String, reason: &'static str },

    #[error("skill template '{name}' is invalid: {reason}")]
    InvalidSkill { name: String, reason: &'static str },
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn is_invalid_operation(&self) -> bool {
        false
    }

    fn error_code(&self) -> &'static str {
        match self {
            ContentError::DuplicateCharacter(_) => "CONTENT_DUPLICATE_CHARACTER",
            ContentError::DuplicateSkill(_) => "CONTENT_DUPLICATE_SKILL",
            ContentError::MissingSkill { .. } => "CONTENT_MISSING_SKILL",
            ContentError::InvalidCharacter { .. } => "CONTENT_INVALID_CHARACTER",
            ContentError::InvalidSkill { .. } => "CONTENT_INVALID_SKILL",
        }
    }
}
