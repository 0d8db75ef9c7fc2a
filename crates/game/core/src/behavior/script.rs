//! Map script turns.
//!
//! Each script acts on the engine's private state copy and, if it still
//! exists afterwards, pays [`GameConfig::CT_PER_BASIC_ACTION`].

use crate::action::{ChargeError, spend_charge};
use crate::combat::apply_damage;
use crate::config::GameConfig;
use crate::env::{AnimationInfo, GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    AreaDamageScript, EntityId, GameState, MapScript, ReduceCooldownScript, SpawnerScript,
    TimedElement,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("script {0} not found")]
    NotFound(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Charge(#[from] ChargeError),
}

impl GameError for ScriptError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScriptError::NotFound(_) => ErrorSeverity::Internal,
            ScriptError::Oracle(err) => err.severity(),
            ScriptError::Charge(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScriptError::NotFound(_) => "SCRIPT_NOT_FOUND",
            ScriptError::Oracle(err) => err.error_code(),
            ScriptError::Charge(err) => err.error_code(),
        }
    }
}

/// Runs one turn of the script with `id`.
pub fn act(state: &mut GameState, env: &GameEnv<'_>, id: EntityId) -> Result<(), ScriptError> {
    let script = state.script(id).cloned().ok_or(ScriptError::NotFound(id))?;
    tracing::trace!(script = %id, kind = script.kind_name(), ct = script.ct(), "script turn");

    match script {
        MapScript::Spawner(spawner) => run_spawner(state, env, spawner)?,
        MapScript::ReduceCooldown(ticker) => run_cooldown(state, ticker),
        MapScript::AreaDamage(blast) => run_area_damage(state, env, blast),
    }

    if state.script(id).is_some() {
        spend_charge(state, TimedElement::Script(id), GameConfig::CT_PER_BASIC_ACTION)?;
    }
    Ok(())
}

fn run_spawner(
    state: &mut GameState,
    env: &GameEnv<'_>,
    mut spawner: SpawnerScript,
) -> Result<(), ScriptError> {
    if spawner.is_exhausted() {
        return Ok(());
    }
    if spawner.countdown > 0 {
        spawner.countdown -= 1;
        state.update_script(spawner.into());
        return Ok(());
    }
    if state.is_occupied(spawner.position) {
        tracing::debug!(script = %spawner.id, position = %spawner.position, "spawn held, tile occupied");
        return Ok(());
    }

    let content = env.content()?;
    let spawn = content.create_character(state.ids_mut(), &spawner.spawn_name, spawner.position)?;
    tracing::debug!(script = %spawner.id, spawn = %spawn.id, name = %spawn.name, "spawned");
    state.log(format!("{} emerges.", spawn.name));
    state.enemies.push(spawn);

    spawner.spawned += 1;
    spawner.countdown = spawner.spawn_cooldown;
    state.update_script(spawner.into());
    Ok(())
}

fn run_cooldown(state: &mut GameState, ticker: ReduceCooldownScript) {
    let Some(skill) = state
        .character_mut(ticker.character)
        .and_then(|c| c.skill_mut(ticker.skill))
    else {
        tracing::trace!(script = %ticker.id, "cooldown owner gone");
        state.remove_script(ticker.id);
        return;
    };

    let resources = &mut skill.resources;
    resources.cooldown = resources.cooldown.saturating_sub(1);
    if resources.cooldown > 0 {
        return;
    }

    let mut rearm = false;
    if resources.recharged_ammo_on_cooldown && resources.ammo_below_max() {
        *resources = resources.with_ammo_added(1);
        if resources.ammo_below_max() {
            resources.cooldown = resources.max_cooldown;
            rearm = true;
        }
    }

    state.remove_script(ticker.id);
    if rearm {
        let id = state.allocate_id();
        state.scripts.push(
            ReduceCooldownScript {
                id,
                ct: 0,
                ..ticker
            }
            .into(),
        );
    }
}

fn run_area_damage(state: &mut GameState, env: &GameEnv<'_>, blast: AreaDamageScript) {
    env.animations().request_animation(
        state,
        &AnimationInfo::SpecificAreaExplosion {
            points: blast.area.clone(),
        },
    );
    let victims: Vec<EntityId> = blast
        .area
        .iter()
        .filter_map(|p| state.character_at(*p).map(|c| c.id))
        .collect();
    tracing::debug!(script = %blast.id, victims = victims.len(), "delayed blast detonates");
    for id in victims {
        apply_damage(state, env, id, blast.damage);
    }
    state.remove_script(blast.id);
}
