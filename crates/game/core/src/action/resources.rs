//! Ammo and cooldown bookkeeping after a skill fires.

use crate::state::{EntityId, GameState, ReduceCooldownScript};

/// Charges the resource cost of `skill` owned by `owner`.
///
/// Ammo drops by one. Cooldown skills restart their cooldown and get a fresh
/// ticker script, unless a recharging skill is already mid-cycle (its running
/// ticker keeps refilling ammo).
pub(crate) fn charge_skill_cost(state: &mut GameState, owner: EntityId, skill: EntityId) {
    let Some(resources) = state
        .character_mut(owner)
        .and_then(|c| c.skill_mut(skill))
        .map(|s| &mut s.resources)
    else {
        return;
    };

    if let Some(ammo) = resources.ammo.as_mut() {
        ammo.current = ammo.current.saturating_sub(1);
    }

    let mid_cycle = resources.recharged_ammo_on_cooldown && resources.cooldown > 0;
    if !resources.uses_cooldown() || mid_cycle {
        return;
    }
    resources.cooldown = resources.max_cooldown;

    let id = state.allocate_id();
    state.scripts.push(
        ReduceCooldownScript {
            id,
            ct: 0,
            character: owner,
            skill,
        }
        .into(),
    );
}
