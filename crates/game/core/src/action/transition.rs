use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// Defines how a concrete action variant changes the game state.
///
/// The engine always runs a transition on its own private copy of the state,
/// so `apply` may mutate freely: if any phase fails the copy is discarded and
/// the caller's state is untouched.
pub trait ActionTransition {
    type Error;

    /// Returns the character performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations should
    /// assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
