//! Collaborator access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised when a collaborator is missing or cannot satisfy a lookup.
///
/// Both kinds are configuration bugs: the engine cannot invent content or maps.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No content library was supplied to the environment.
    #[error("content library not available")]
    ContentNotAvailable,

    /// No generator registry was supplied.
    #[error("map generators not available")]
    GeneratorsNotAvailable,

    #[error("character template '{0}' not found")]
    CharacterTemplateNotFound(String),

    #[error("skill template '{0}' not found")]
    SkillTemplateNotFound(String),

    #[error("map generator '{0}' not found")]
    GeneratorNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn is_invalid_operation(&self) -> bool {
        false
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ContentNotAvailable => "ORACLE_CONTENT_NOT_AVAILABLE",
            GeneratorsNotAvailable => "ORACLE_GENERATORS_NOT_AVAILABLE",
            CharacterTemplateNotFound(_) => "ORACLE_CHARACTER_TEMPLATE_NOT_FOUND",
            SkillTemplateNotFound(_) => "ORACLE_SKILL_TEMPLATE_NOT_FOUND",
            GeneratorNotFound(_) => "ORACLE_GENERATOR_NOT_FOUND",
        }
    }
}
