use crate::action::ActionTransition;
use crate::action::charge::{self, ChargeError};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error(transparent)]
    Charge(#[from] ChargeError),
}

impl GameError for WaitError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Wait action - actor passes their turn without performing any action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction {
    pub actor: EntityId,
}

impl WaitAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for WaitAction {
    type Error = WaitError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state
            .character(self.actor)
            .map(|_| ())
            .ok_or(WaitError::ActorNotFound(self.actor))
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        charge::spend_character(state, self.actor, GameConfig::CT_PER_BASIC_ACTION)?;
        Ok(())
    }
}
