//! Scripted player for headless runs.
//!
//! Heal when low, otherwise hit the closest enemy with the strongest ready
//! damage skill, otherwise walk toward the closest enemy, otherwise wait.

use std::cmp::Reverse;

use arena_core::{
    Action, ArenaEngine, Character, DistanceField, GameState, MoveAction, Skill, SkillEffect,
    UseSkillAction, WaitAction,
};

const HEAL_BELOW_PERCENT: i32 = 50;

pub fn choose(engine: &ArenaEngine<'_>, state: &GameState) -> Action {
    let player = &state.player;

    heal(engine, state, player)
        .or_else(|| attack(engine, state, player))
        .or_else(|| approach(engine, state, player))
        .unwrap_or_else(|| WaitAction::new(player.id).into())
}

fn ready_skills<'a>(
    player: &'a Character,
    wanted: impl Fn(&SkillEffect) -> bool + 'a,
) -> impl Iterator<Item = &'a Skill> + 'a {
    player
        .skills
        .iter()
        .filter(move |s| s.ready_for_use() && wanted(&s.effect))
}

fn heal(engine: &ArenaEngine<'_>, state: &GameState, player: &Character) -> Option<Action> {
    if player.health.percent() >= HEAL_BELOW_PERCENT {
        return None;
    }
    ready_skills(player, |e| matches!(e, SkillEffect::Heal { .. }))
        .find(|s| engine.is_valid_target_for_skill(state, player.id, s.id, player.position))
        .map(|s| UseSkillAction::new(player.id, s.id, player.position).into())
}

fn attack(engine: &ArenaEngine<'_>, state: &GameState, player: &Character) -> Option<Action> {
    let mut skills: Vec<&Skill> = ready_skills(player, |e| matches!(e, SkillEffect::Damage(_))).collect();
    skills.sort_by_key(|s| Reverse(s.power()));

    let mut enemies: Vec<&Character> = state.enemies.iter().collect();
    enemies.sort_by_key(|e| e.position.distance_squared(player.position));

    for skill in skills {
        for enemy in &enemies {
            if engine.is_valid_target_for_skill(state, player.id, skill.id, enemy.position) {
                return Some(UseSkillAction::new(player.id, skill.id, enemy.position).into());
            }
        }
    }
    None
}

fn approach(engine: &ArenaEngine<'_>, state: &GameState, player: &Character) -> Option<Action> {
    let closest = state
        .enemies
        .iter()
        .min_by_key(|e| e.position.distance_squared(player.position))?;
    let field = DistanceField::compute(state.map(), closest.position);
    field
        .next_steps(player.position)
        .into_iter()
        .find(|d| engine.could_character_walk(state, player.position.step(*d)))
        .map(|d| MoveAction::new(player.id, d).into())
}
