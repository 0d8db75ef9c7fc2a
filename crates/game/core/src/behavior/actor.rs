//! Enemy decision steps, in chain order.

use crate::action::targeting::{is_valid_target, points_skill_can_target};
use crate::action::{Action, MoveAction, UseSkillAction, WaitAction, could_character_walk};
use crate::geometry::Point;
use crate::pathfinding::DistanceField;
use crate::state::{EffectKind, Skill, SkillEffect};

use super::{ActorContext, ActorStep, CombatProfile, Decision, PriorityChain, best_by_power};

/// The standard enemy chain.
pub fn default_chain() -> PriorityChain {
    PriorityChain::new(vec![
        Box::new(SelfHeal),
        Box::new(MoveAndAttack),
        Box::new(DirectAttack),
        Box::new(DelayedAttack),
        Box::new(MovementSkill),
        Box::new(WalkTowardPlayer),
        Box::new(WaitFallback),
    ])
}

fn use_skill(ctx: &ActorContext<'_>, skill: &Skill, target: Point) -> Decision {
    Decision::Act(Action::UseSkill(UseSkillAction::new(ctx.actor.id, skill.id, target)))
}

fn ready_of_kind<'a>(ctx: &ActorContext<'a>, kind: EffectKind) -> impl Iterator<Item = &'a Skill> + 'a {
    ctx.ready_skills().filter(move |s| s.effect.kind() == kind)
}

/// Ready skills of `kind` that can hit the player where they stand.
fn ready_against_player<'a>(ctx: &ActorContext<'a>, kind: EffectKind) -> Vec<&'a Skill> {
    let target = ctx.state.player.position;
    ready_of_kind(ctx, kind)
        .filter(|s| is_valid_target(ctx.state, ctx.env, ctx.actor, s, target))
        .collect()
}

/// First point that strictly beats the current distance, keeping the best seen.
///
/// `closer` picks the smallest distance, otherwise the largest.
fn best_improving_point(
    distances: &DistanceField,
    current: i32,
    candidates: impl IntoIterator<Item = Point>,
    closer: bool,
) -> Option<Point> {
    let current = if closer && current == DistanceField::UNREACHABLE {
        i32::MAX
    } else {
        current
    };
    let mut best: Option<(Point, i32)> = None;
    for point in candidates {
        let distance = distances.distance(point);
        if distance == DistanceField::UNREACHABLE {
            continue;
        }
        let bar = best.map_or(current, |(_, d)| d);
        let better = if closer { distance < bar } else { distance > bar };
        if better {
            best = Some((point, distance));
        }
    }
    best.map(|(point, _)| point)
}

// ===== chain steps =====

/// Heals itself with the strongest ready heal when badly hurt. Off unless configured.
pub struct SelfHeal;

impl ActorStep for SelfHeal {
    fn name(&self) -> &'static str {
        "self_heal"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        let config = ctx.env.config();
        if !config.enemy_self_heal {
            return Decision::NoAction;
        }
        let threshold = i32::try_from(config.self_heal_threshold_percent).unwrap_or(i32::MAX);
        if ctx.actor.health.percent() >= threshold {
            return Decision::NoAction;
        }
        let own = ctx.actor.position;
        let heals = ready_of_kind(ctx, EffectKind::Heal)
            .filter(|s| is_valid_target(ctx.state, ctx.env, ctx.actor, s, own));
        match best_by_power(heals) {
            Some(skill) => use_skill(ctx, skill, own),
            None => Decision::NoAction,
        }
    }
}

/// Repositions with a leap-and-strike skill, closing in or kiting by profile.
pub struct MoveAndAttack;

impl ActorStep for MoveAndAttack {
    fn name(&self) -> &'static str {
        "move_and_attack"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        let mut skills: Vec<(usize, &Skill)> = ready_of_kind(ctx, EffectKind::MoveAndDamageClosest)
            .enumerate()
            .collect();
        if skills.is_empty() {
            return Decision::NoAction;
        }
        skills.sort_by(|(ia, a), (ib, b)| b.power().cmp(&a.power()).then(ib.cmp(ia)));

        let closer = ctx.profile() == CombatProfile::Melee;
        let current = ctx.distances.distance(ctx.actor.position);
        for (_, skill) in skills {
            let candidates = points_skill_can_target(ctx.state, ctx.env, ctx.actor, skill);
            if let Some(point) = best_improving_point(&ctx.distances, current, candidates, closer) {
                tracing::trace!(actor = %ctx.actor.id, skill = %skill.name, %point, "leap chosen");
                return use_skill(ctx, skill, point);
            }
        }
        Decision::NoAction
    }
}

/// Hits the player directly, preferring stunning skills.
///
/// Line skills accept any target off the actor's own tile, so an actor whose
/// best ready attack is a line thrusts from any distance instead of closing in.
pub struct DirectAttack;

impl ActorStep for DirectAttack {
    fn name(&self) -> &'static str {
        "direct_attack"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        let valid = ready_against_player(ctx, EffectKind::Damage);
        let stunning = best_by_power(
            valid
                .iter()
                .copied()
                .filter(|s| matches!(s.effect, SkillEffect::Damage(info) if info.stuns())),
        );
        match stunning.or_else(|| best_by_power(valid.into_iter())) {
            Some(skill) => use_skill(ctx, skill, ctx.state.player.position),
            None => Decision::NoAction,
        }
    }
}

/// Plants a delayed blast on the player.
pub struct DelayedAttack;

impl ActorStep for DelayedAttack {
    fn name(&self) -> &'static str {
        "delayed_attack"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        let valid = ready_against_player(ctx, EffectKind::DelayedDamage);
        match best_by_power(valid.into_iter()) {
            Some(skill) => use_skill(ctx, skill, ctx.state.player.position),
            None => Decision::NoAction,
        }
    }
}

/// Uses a pure movement skill to get as close to the player as possible.
pub struct MovementSkill;

impl ActorStep for MovementSkill {
    fn name(&self) -> &'static str {
        "movement_skill"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        let current = ctx.distances.distance(ctx.actor.position);
        let mut best: Option<(&Skill, Point, i32)> = None;
        for skill in ready_of_kind(ctx, EffectKind::Movement) {
            let candidates = points_skill_can_target(ctx.state, ctx.env, ctx.actor, skill);
            let bar = best.map_or(current, |(_, _, d)| d);
            if let Some(point) = best_improving_point(&ctx.distances, bar, candidates, true) {
                best = Some((skill, point, ctx.distances.distance(point)));
            }
        }
        match best {
            Some((skill, point, _)) => use_skill(ctx, skill, point),
            None => Decision::NoAction,
        }
    }
}

/// Steps along the shortest path to the player.
pub struct WalkTowardPlayer;

impl ActorStep for WalkTowardPlayer {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        let origin = ctx.actor.position;
        ctx.distances
            .next_steps(origin)
            .into_iter()
            .find(|d| could_character_walk(ctx.state, origin.step(*d)))
            .map(|direction| Action::Move(MoveAction::new(ctx.actor.id, direction)))
            .into()
    }
}

/// Always applies: spends the turn doing nothing.
pub struct WaitFallback;

impl ActorStep for WaitFallback {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision {
        Decision::Act(Action::Wait(WaitAction::new(ctx.actor.id)))
    }
}
