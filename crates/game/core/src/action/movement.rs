use crate::action::ActionTransition;
use crate::action::charge::{self, ChargeError};
use crate::config::GameConfig;
use crate::env::{AnimationInfo, GameEnv};
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::{Direction, Point};
use crate::state::{EntityId, GameState};

/// Movement failures. A blocked destination is not one of them: the move is
/// simply absorbed without cost.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error(transparent)]
    Charge(#[from] ChargeError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Single step in one of the eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self { actor, direction }
    }
}

/// True when `target` is on the map, floor, and free of characters.
pub fn could_character_walk(state: &GameState, target: Point) -> bool {
    state.map().is_walkable(target) && !state.is_occupied(target)
}

/// Moves a character without charging time, emitting a movement animation for enemies.
pub(crate) fn relocate(
    state: &mut GameState,
    env: &GameEnv<'_>,
    actor: EntityId,
    path: Vec<Point>,
) -> bool {
    let Some(destination) = path.last().copied() else {
        return false;
    };
    let Some(character) = state.character_mut(actor) else {
        return false;
    };
    character.position = destination;
    if !character.is_player {
        env.animations().request_animation(
            state,
            &AnimationInfo::Movement {
                character: actor,
                path,
            },
        );
    }
    true
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state
            .character(self.actor)
            .map(|_| ())
            .ok_or(MoveError::ActorNotFound(self.actor))
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let origin = state
            .character(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?
            .position;
        let destination = origin.step(self.direction);

        if !could_character_walk(state, destination) {
            tracing::trace!("move of {} toward {} absorbed", self.actor, destination);
            return Ok(());
        }

        charge::spend_character(state, self.actor, GameConfig::CT_PER_MOVEMENT)?;
        relocate(state, env, self.actor, vec![destination]);
        Ok(())
    }
}
