//! Common error infrastructure for arena-core.
//!
//! Domain errors (`SkillError`, `MoveError`, `ChargeError`, ...) live beside the
//! actions that raise them. This module only defines the shared classification
//! so the engine and the runtime can treat every error uniformly.
//!
//! Two families matter to callers:
//!
//! - **Invalid operations**: the caller asked for something the rules forbid
//!   (skill not owned, target invalid, skill not ready, CT overdraft, moving
//!   onto an occupied tile). These abort the whole command with no partial
//!   application.
//! - **Configuration failures**: a collaborator is missing or a content
//!   template is unknown.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the command may succeed with a different choice
/// - **Validation**: the command broke a rule and must not be retried unchanged
/// - **Internal**: the engine itself broke an invariant
/// - **Fatal**: the environment is misconfigured and play cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: target no longer visible after the state moved on.
    Recoverable,

    /// Examples: skill not owned, skill on cooldown, invalid target.
    Validation,

    /// Examples: a behavior left its actor ready to act again.
    Internal,

    /// Examples: missing content library, unknown template.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arena-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Report `is_invalid_operation` for every variant a caller could have
///   avoided by pre-validating with the engine queries
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns true when the error was caused by a rule-breaking request.
    fn is_invalid_operation(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Validation)
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("probe")]
    struct Probe(ErrorSeverity);

    impl GameError for Probe {
        fn severity(&self) -> ErrorSeverity {
            self.0
        }
    }

    #[test]
    fn only_validation_errors_are_invalid_operations() {
        assert!(Probe(ErrorSeverity::Validation).is_invalid_operation());
        assert!(!Probe(ErrorSeverity::Fatal).is_invalid_operation());
        assert!(!Probe(ErrorSeverity::Recoverable).is_invalid_operation());
    }

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
