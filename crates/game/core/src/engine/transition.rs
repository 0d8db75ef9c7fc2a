//! Action transition dispatch.

use crate::action::{Action, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes each action to its transition. `state` is the engine's private copy.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), ExecuteError> {
    match action {
        Action::Move(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Move)
        }
        Action::Wait(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Wait)
        }
        Action::UseSkill(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::UseSkill)
        }
    }
}
