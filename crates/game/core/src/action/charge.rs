//! Charge-time spending shared by every action.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, TimedElement};

/// Raised when an action would drive a timed element's CT below zero.
///
/// The scheduler never grants a turn below the action threshold, so this only
/// fires when a caller acts out of turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChargeError {
    #[error("{element:?} has {available} CT, cannot spend {requested}")]
    Insufficient {
        element: TimedElement,
        available: i32,
        requested: i32,
    },

    #[error("{0:?} not found")]
    Missing(TimedElement),
}

impl GameError for ChargeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ChargeError::Insufficient { .. } => "CHARGE_INSUFFICIENT",
            ChargeError::Missing(_) => "CHARGE_MISSING_ELEMENT",
        }
    }
}

/// Removes `amount` CT from `element`, refusing to go below zero.
pub(crate) fn spend(
    state: &mut GameState,
    element: TimedElement,
    amount: i32,
) -> Result<(), ChargeError> {
    let ct = match element {
        TimedElement::Player => Some(&mut state.player.ct),
        TimedElement::Enemy(id) => state.character_mut(id).map(|c| &mut c.ct),
        TimedElement::Script(id) => state.script_mut(id).map(|s| s.ct_mut()),
    }
    .ok_or(ChargeError::Missing(element))?;

    if *ct < amount {
        return Err(ChargeError::Insufficient {
            element,
            available: *ct,
            requested: amount,
        });
    }
    *ct -= amount;
    Ok(())
}

/// Spends CT from the character with `id`, player or enemy.
pub(crate) fn spend_character(
    state: &mut GameState,
    id: EntityId,
    amount: i32,
) -> Result<(), ChargeError> {
    let element = if state.player.id == id {
        TimedElement::Player
    } else {
        TimedElement::Enemy(id)
    };
    spend(state, element, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::map::Map;
    use crate::state::{Character, Health, SpawnerScript};

    fn arena() -> GameState {
        let player = Character::player(EntityId(1), "Hero", Point::new(1, 1), Health::full(10))
            .with_ct(100);
        let spawner = SpawnerScript::new(EntityId(2), Point::new(2, 2), "Rat", 1, 1);
        GameState::new(Map::box_room(5, 5), player).with_scripts(vec![spawner.into()])
    }

    #[test]
    fn spending_is_exact() {
        let mut state = arena();
        spend(&mut state, TimedElement::Player, 100).unwrap();
        assert_eq!(state.player.ct, 0);
    }

    #[test]
    fn overdraft_is_refused_without_change() {
        let mut state = arena();
        state.player.ct = 50;
        let err = spend(&mut state, TimedElement::Player, 100).unwrap_err();
        assert_eq!(
            err,
            ChargeError::Insufficient {
                element: TimedElement::Player,
                available: 50,
                requested: 100
            }
        );
        assert_eq!(state.player.ct, 50);
        assert!(err.is_invalid_operation());
    }

    #[test]
    fn scripts_and_missing_elements() {
        let mut state = arena();
        assert!(spend(&mut state, TimedElement::Script(EntityId(2)), 10).is_err());
        assert_eq!(
            spend(&mut state, TimedElement::Enemy(EntityId(9)), 10),
            Err(ChargeError::Missing(TimedElement::Enemy(EntityId(9))))
        );
    }
}
