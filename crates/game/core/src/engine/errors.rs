//! Error types for the action execution pipeline.

use crate::action::{ActionTransition, MoveAction, UseSkillAction, WaitAction};
use crate::behavior::ScriptError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, TimedElement};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing actions or running the scheduler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("wait action failed: {0}")]
    Wait(TransitionPhaseError<<WaitAction as ActionTransition>::Error>),

    #[error("skill action failed: {0}")]
    UseSkill(TransitionPhaseError<<UseSkillAction as ActionTransition>::Error>),

    #[error("script turn failed: {0}")]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("invalid actor: action actor {actor} is not the player {player}")]
    NotPlayerAction { actor: EntityId, player: EntityId },

    #[error("{element:?} ended its turn with {ct} CT, still ready to act")]
    TurnNotSpent { element: TimedElement, ct: i32 },

    #[error("scheduler gave up after {steps} dispatches without the player becoming ready")]
    SchedulerStalled { steps: u32 },
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::Move(e) => e.error.severity(),
            ExecuteError::Wait(e) => e.error.severity(),
            ExecuteError::UseSkill(e) => e.error.severity(),
            ExecuteError::Script(e) => e.severity(),
            ExecuteError::Oracle(e) => e.severity(),
            ExecuteError::NotPlayerAction { .. } => ErrorSeverity::Validation,
            ExecuteError::TurnNotSpent { .. } | ExecuteError::SchedulerStalled { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Move(e) => e.error.error_code(),
            ExecuteError::Wait(e) => e.error.error_code(),
            ExecuteError::UseSkill(e) => e.error.error_code(),
            ExecuteError::Script(e) => e.error_code(),
            ExecuteError::Oracle(e) => e.error_code(),
            ExecuteError::NotPlayerAction { .. } => "EXECUTE_NOT_PLAYER_ACTION",
            ExecuteError::TurnNotSpent { .. } => "EXECUTE_TURN_NOT_SPENT",
            ExecuteError::SchedulerStalled { .. } => "EXECUTE_SCHEDULER_STALLED",
        }
    }
}

impl ExecuteError {
    /// The phase the failing transition was in, if an action failed.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            ExecuteError::Move(e) => Some(e.phase),
            ExecuteError::Wait(e) => Some(e.phase),
            ExecuteError::UseSkill(e) => Some(e.phase),
            _ => None,
        }
    }
}
