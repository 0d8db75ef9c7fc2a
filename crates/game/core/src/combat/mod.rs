//! Combat resolution: damage, healing and death.
//!
//! # Rules
//!
//! - Damage is reduced by the target's flat defense and never heals.
//! - Enemies at zero health or below leave the state immediately.
//! - The player is never removed; their death is signalled to the animation
//!   sink once, on the hit that drops them.
//! - Healing is clamped to maximum health.

use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// What a single damage application did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// No character with that id exists.
    Missed,
    Wounded { dealt: i32 },
    /// Enemy removed from the state.
    Killed { dealt: i32 },
    /// Player dropped to zero health or below on this hit.
    PlayerDown { dealt: i32 },
}

/// Applies `amount` damage to `target`, returning the new state.
pub fn damage(state: &GameState, env: &GameEnv<'_>, target: EntityId, amount: i32) -> GameState {
    let mut next = state.clone();
    apply_damage(&mut next, env, target, amount);
    next
}

/// Heals `target` by `amount`, returning the new state.
pub fn heal(state: &GameState, target: EntityId, amount: i32) -> GameState {
    let mut next = state.clone();
    apply_heal(&mut next, target, amount);
    next
}

pub(crate) fn apply_damage(
    state: &mut GameState,
    env: &GameEnv<'_>,
    target: EntityId,
    amount: i32,
) -> DamageOutcome {
    let Some(character) = state.character_mut(target) else {
        return DamageOutcome::Missed;
    };

    let dealt = character.defense.reduce(amount);
    let was_alive = character.is_alive();
    character.health = character.health.damaged(dealt);
    let is_player = character.is_player;
    let dead = !character.is_alive();
    let name = character.name.clone();

    tracing::debug!(character = %target, dealt, dead, "damage applied");

    match (dead, is_player) {
        (false, _) => DamageOutcome::Wounded { dealt },
        (true, true) => {
            if was_alive {
                state.log(format!("{name} has fallen."));
                env.animations().request_player_dead(state);
            }
            DamageOutcome::PlayerDown { dealt }
        }
        (true, false) => {
            state.remove_enemy(target);
            state.log(format!("{name} is slain."));
            DamageOutcome::Killed { dealt }
        }
    }
}

pub(crate) fn apply_heal(state: &mut GameState, target: EntityId, amount: i32) -> bool {
    match state.character_mut(target) {
        Some(character) => {
            character.health = character.health.healed(amount);
            true
        }
        None => false,
    }
}
