//! Effect resolution for skills.
//!
//! Every function here mutates the engine's private copy of the state. The
//! skill transition has already validated ownership, readiness and target.

use crate::action::movement::{could_character_walk, relocate};
use crate::action::targeting::affected_points;
use crate::combat::{apply_damage, apply_heal};
use crate::env::{AnimationInfo, GameEnv};
use crate::geometry::{Direction, Point, line_points};
use crate::state::{
    AreaDamageScript, Character, DamageFlags, DamageInfo, EntityId, GameState, Skill, SkillEffect,
    TargettingStyle,
};

use super::skill::SkillError;

pub(crate) fn resolve(
    state: &mut GameState,
    env: &GameEnv<'_>,
    invoker: EntityId,
    skill: &Skill,
    target: Point,
) -> Result<(), SkillError> {
    match skill.effect {
        SkillEffect::None => Ok(()),
        SkillEffect::Damage(info) => {
            resolve_damage(state, env, invoker, skill, info, target);
            Ok(())
        }
        SkillEffect::DelayedDamage { power } => {
            plant_delayed_blast(state, env, invoker, skill, power, target);
            Ok(())
        }
        SkillEffect::Movement => move_invoker(state, env, invoker, target),
        SkillEffect::MoveAndDamageClosest { power, range } => {
            move_invoker(state, env, invoker, target)?;
            strike_closest(state, env, invoker, power, range);
            Ok(())
        }
        SkillEffect::Heal { power } => {
            resolve_heal(state, invoker, skill, power, target);
            Ok(())
        }
    }
}

fn invoker_snapshot(state: &GameState, invoker: EntityId) -> Option<Character> {
    state.character(invoker).cloned()
}

fn characters_on(state: &GameState, points: &[Point]) -> Vec<EntityId> {
    points
        .iter()
        .filter_map(|p| state.character_at(*p).map(|c| c.id))
        .collect()
}

// ===== damage =====

fn resolve_damage(
    state: &mut GameState,
    env: &GameEnv<'_>,
    invoker: EntityId,
    skill: &Skill,
    info: DamageInfo,
    target: Point,
) {
    if info.flags.contains(DamageFlags::CHARGE) {
        charge_toward(state, env, invoker, target);
    }
    let Some(attacker) = invoker_snapshot(state, invoker) else {
        return;
    };
    let origin = attacker.position;

    let points = affected_points(state, &attacker, skill, target);
    if let Some(animation) = damage_animation(skill, origin, target, &points) {
        env.animations().request_animation(state, &animation);
    }

    let hits = characters_on(state, &points);
    tracing::debug!(
        "{} hits {} character(s) with {}",
        attacker.name,
        hits.len(),
        skill.name
    );
    for id in &hits {
        apply_damage(state, env, *id, info.power);
    }

    let survivors: Vec<EntityId> = hits
        .into_iter()
        .filter(|id| state.character(*id).is_some())
        .collect();

    if info.stuns() {
        let penalty = env.config().stun_ct_penalty;
        for id in &survivors {
            if let Some(character) = state.character_mut(*id) {
                character.ct -= penalty;
            }
        }
    }

    if info.flags.contains(DamageFlags::KNOCKBACK) {
        if let Some(direction) = Direction::between(origin, target) {
            knock_back(state, env, origin, direction, survivors);
        }
    }
}

fn damage_animation(skill: &Skill, origin: Point, target: Point, points: &[Point]) -> Option<AnimationInfo> {
    let info = skill.target_info;
    match info.style {
        TargettingStyle::Point if info.area == 0 => {
            let impact = points.first().copied().unwrap_or(target);
            Some(AnimationInfo::Projectile {
                path: line_points(origin, impact),
            })
        }
        TargettingStyle::Point => Some(AnimationInfo::Explosion {
            center: target,
            radius: info.area,
        }),
        TargettingStyle::Cone => Direction::between(origin, target).map(|direction| AnimationInfo::Cone {
            origin,
            direction,
            points: points.to_vec(),
        }),
        TargettingStyle::Line => Some(AnimationInfo::SpecificAreaExplosion {
            points: points.to_vec(),
        }),
        TargettingStyle::None => None,
    }
}

/// Moves the invoker onto the last free tile before `target` along the trace.
fn charge_toward(state: &mut GameState, env: &GameEnv<'_>, invoker: EntityId, target: Point) {
    let Some(origin) = state.character(invoker).map(|c| c.position) else {
        return;
    };
    let trace = line_points(origin, target);
    if trace.len() < 2 {
        return;
    }
    let approach: Vec<Point> = trace[..trace.len() - 1].to_vec();
    let blocked = approach.iter().any(|p| !could_character_walk(state, *p));
    if blocked {
        tracing::trace!("charge by {} toward {} blocked", invoker, target);
        return;
    }
    relocate(state, env, invoker, approach);
}

/// Pushes each survivor one tile along `direction`, farthest first.
fn knock_back(
    state: &mut GameState,
    env: &GameEnv<'_>,
    origin: Point,
    direction: Direction,
    mut targets: Vec<EntityId>,
) {
    targets.sort_by_key(|id| {
        std::cmp::Reverse(
            state
                .character(*id)
                .map_or(0, |c| c.position.lattice_distance(origin)),
        )
    });
    for id in targets {
        let Some(position) = state.character(id).map(|c| c.position) else {
            continue;
        };
        let destination = position.step(direction);
        if could_character_walk(state, destination) {
            relocate(state, env, id, vec![destination]);
        }
    }
}

// ===== delayed damage =====

fn plant_delayed_blast(
    state: &mut GameState,
    env: &GameEnv<'_>,
    invoker: EntityId,
    skill: &Skill,
    power: i32,
    target: Point,
) {
    let Some(attacker) = invoker_snapshot(state, invoker) else {
        return;
    };
    let area = affected_points(state, &attacker, skill, target);
    let id = state.allocate_id();
    tracing::debug!(
        "{} plants a delayed blast {} over {} point(s)",
        attacker.name,
        id,
        area.len()
    );
    state.scripts.push(
        AreaDamageScript {
            id,
            ct: env.config().delayed_damage_start_ct,
            area,
            damage: power,
        }
        .into(),
    );
}

// ===== movement =====

fn move_invoker(
    state: &mut GameState,
    env: &GameEnv<'_>,
    invoker: EntityId,
    target: Point,
) -> Result<(), SkillError> {
    if state.is_occupied(target) {
        return Err(SkillError::DestinationOccupied { target });
    }
    let origin = state
        .character(invoker)
        .ok_or(SkillError::ActorNotFound(invoker))?
        .position;
    relocate(state, env, invoker, line_points(origin, target));
    Ok(())
}

/// Damages the nearest opposing character with a clear line from the invoker.
fn strike_closest(state: &mut GameState, env: &GameEnv<'_>, invoker: EntityId, power: i32, range: u32) {
    let Some(attacker) = invoker_snapshot(state, invoker) else {
        return;
    };
    let origin = attacker.position;
    let map = state.map();

    let mut candidates: Vec<(u64, EntityId, Point)> = state
        .all_characters()
        .filter(|c| !c.is_ally_of(&attacker))
        .filter(|c| origin.within_range(c.position, range))
        .filter(|c| map.is_path_clear(origin, c.position))
        .map(|c| (origin.distance_squared(c.position), c.id, c.position))
        .collect();
    candidates.sort_by_key(|(distance, _, _)| *distance);

    let Some((_, victim, position)) = candidates.first().copied() else {
        return;
    };
    let path = line_points(origin, position);
    if !path.is_empty() {
        env.animations()
            .request_animation(state, &AnimationInfo::Projectile { path });
    }
    apply_damage(state, env, victim, power);
}

// ===== heal =====

fn resolve_heal(state: &mut GameState, invoker: EntityId, skill: &Skill, power: i32, target: Point) {
    let Some(healer) = invoker_snapshot(state, invoker) else {
        return;
    };
    let points = affected_points(state, &healer, skill, target);
    let allies: Vec<EntityId> = points
        .iter()
        .filter_map(|p| state.character_at(*p))
        .filter(|c| c.is_ally_of(&healer))
        .map(|c| c.id)
        .collect();
    for id in allies {
        apply_heal(state, id, power);
    }
}
