//! Skill invocation.
//!
//! Preconditions are checked before anything changes: the invoker must own
//! the skill, the skill must be ready and the target must be valid. A broken
//! precondition is an invalid operation, never a silent no-op.

use crate::action::ActionTransition;
use crate::action::charge::{self, ChargeError};
use crate::action::{effects, resources, targeting};
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Point;
use crate::state::{EntityId, GameState, StateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("{actor} does not own skill {skill}")]
    SkillNotOwned { actor: EntityId, skill: EntityId },

    #[error("skill {skill} of {actor} is not ready")]
    SkillNotReady { actor: EntityId, skill: EntityId },

    #[error("skill {skill} cannot target {target}")]
    InvalidTarget { skill: EntityId, target: Point },

    #[error("destination {target} is occupied")]
    DestinationOccupied { target: Point },

    #[error(transparent)]
    Charge(#[from] ChargeError),

    #[error("state invariant broken after skill use: {0}")]
    Invariant(#[from] StateError),
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SkillError::Invariant(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SkillError::ActorNotFound(_) => "SKILL_ACTOR_NOT_FOUND",
            SkillError::SkillNotOwned { .. } => "SKILL_NOT_OWNED",
            SkillError::SkillNotReady { .. } => "SKILL_NOT_READY",
            SkillError::InvalidTarget { .. } => "SKILL_INVALID_TARGET",
            SkillError::DestinationOccupied { .. } => "SKILL_DESTINATION_OCCUPIED",
            SkillError::Charge(err) => err.error_code(),
            SkillError::Invariant(_) => "SKILL_STATE_INVARIANT",
        }
    }
}

/// Invoke `skill` owned by `actor` at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseSkillAction {
    pub actor: EntityId,
    pub skill: EntityId,
    pub target: Point,
}

impl UseSkillAction {
    pub fn new(actor: EntityId, skill: EntityId, target: Point) -> Self {
        Self {
            actor,
            skill,
            target,
        }
    }
}

impl ActionTransition for UseSkillAction {
    type Error = SkillError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let invoker = state
            .character(self.actor)
            .ok_or(SkillError::ActorNotFound(self.actor))?;
        let skill = invoker.skill(self.skill).ok_or(SkillError::SkillNotOwned {
            actor: self.actor,
            skill: self.skill,
        })?;

        if !skill.ready_for_use() {
            return Err(SkillError::SkillNotReady {
                actor: self.actor,
                skill: self.skill,
            });
        }
        if skill.effect.relocates_invoker() && state.is_occupied(self.target) {
            return Err(SkillError::DestinationOccupied {
                target: self.target,
            });
        }
        if !targeting::is_valid_target(state, env, invoker, skill, self.target) {
            return Err(SkillError::InvalidTarget {
                skill: self.skill,
                target: self.target,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let invoker = state
            .character(self.actor)
            .ok_or(SkillError::ActorNotFound(self.actor))?;
        let skill = invoker
            .skill(self.skill)
            .cloned()
            .ok_or(SkillError::SkillNotOwned {
                actor: self.actor,
                skill: self.skill,
            })?;
        let name = invoker.name.clone();

        tracing::debug!(
            actor = %self.actor,
            skill = %skill.name,
            effect = %skill.effect.kind(),
            target = %self.target,
            "skill invoked"
        );
        state.log(format!("{name} uses {}.", skill.name));

        effects::resolve(state, env, self.actor, &skill, self.target)?;

        // A skill can kill its own user; there is nobody left to pay.
        if state.character(self.actor).is_none() {
            return Ok(());
        }
        resources::charge_skill_cost(state, self.actor, self.skill);
        charge::spend_character(state, self.actor, GameConfig::CT_PER_BASIC_ACTION)?;
        Ok(())
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.check_invariants()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{AnimationInfo, AnimationSink};
    use crate::map::Map;
    use crate::state::{
        Character, DamageFlags, DamageInfo, Defense, Health, IdAllocator, MapScript, Skill,
        SkillEffect, SkillResources, TargetInfo,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        animations: Mutex<Vec<AnimationInfo>>,
    }

    impl Recorder {
        fn kinds(&self) -> Vec<&'static str> {
            self.animations
                .lock()
                .unwrap()
                .iter()
                .map(AnimationInfo::kind_name)
                .collect()
        }
    }

    impl AnimationSink for Recorder {
        fn request_animation(&self, _state: &GameState, animation: &AnimationInfo) {
            self.animations.lock().unwrap().push(animation.clone());
        }

        fn request_player_dead(&self, _state: &GameState) {}
    }

    const HERO: EntityId = EntityId(1);
    const GOBLIN: EntityId = EntityId(2);

    fn skill(id: u32, effect: SkillEffect, target_info: TargetInfo) -> Skill {
        Skill::new(EntityId(id), format!("skill-{id}"), effect, target_info)
    }

    fn duel(hero_skill: Skill) -> GameState {
        let hero = Character::player(HERO, "Hero", Point::new(1, 1), Health::full(10))
            .with_ct(100)
            .with_skill(hero_skill);
        let goblin = Character::new(GOBLIN, "Goblin", Point::new(4, 1), Health::full(10));
        GameState::new(Map::box_room(8, 5), hero)
            .with_enemies(vec![goblin])
            .with_ids(IdAllocator::starting_at(100))
    }

    fn run(action: &UseSkillAction, state: &GameState, env: &GameEnv<'_>) -> Result<GameState, SkillError> {
        let mut next = state.clone();
        action.pre_validate(&next, env)?;
        action.apply(&mut next, env)?;
        action.post_validate(&next, env)?;
        Ok(next)
    }

    #[test]
    fn bolt_damages_logs_and_spends_turn() {
        let state = duel(skill(10, SkillEffect::Damage(DamageInfo::new(4)), TargetInfo::point(5, 0)));
        let config = GameConfig::default();
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);

        let next = run(&UseSkillAction::new(HERO, EntityId(10), Point::new(4, 1)), &state, &env).unwrap();
        assert_eq!(next.enemies[0].health, Health { current: 6, maximum: 10 });
        assert_eq!(next.player.ct, 0);
        assert_eq!(next.log_entries, vec!["Hero uses skill-10.".to_string()]);
        assert_eq!(recorder.kinds(), vec!["projectile"]);
    }

    #[test]
    fn preconditions_are_invalid_operations() {
        let spent = skill(10, SkillEffect::Damage(DamageInfo::new(4)), TargetInfo::point(5, 0))
            .with_resources(SkillResources::with_ammo(0, 2));
        let state = duel(spent);
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let err = run(&UseSkillAction::new(HERO, EntityId(10), Point::new(4, 1)), &state, &env).unwrap_err();
        assert_eq!(err, SkillError::SkillNotReady { actor: HERO, skill: EntityId(10) });
        assert!(err.is_invalid_operation());

        let err = run(&UseSkillAction::new(HERO, EntityId(99), Point::new(4, 1)), &state, &env).unwrap_err();
        assert_eq!(err, SkillError::SkillNotOwned { actor: HERO, skill: EntityId(99) });

        let ready = duel(skill(10, SkillEffect::Damage(DamageInfo::new(4)), TargetInfo::point(2, 0)));
        let err = run(&UseSkillAction::new(HERO, EntityId(10), Point::new(6, 3)), &ready, &env).unwrap_err();
        assert_eq!(err, SkillError::InvalidTarget { skill: EntityId(10), target: Point::new(6, 3) });
    }

    #[test]
    fn movement_onto_occupied_tile_is_refused() {
        let state = duel(skill(11, SkillEffect::Movement, TargetInfo::point(5, 0)));
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let err = run(&UseSkillAction::new(HERO, EntityId(11), Point::new(4, 1)), &state, &env).unwrap_err();
        assert_eq!(err, SkillError::DestinationOccupied { target: Point::new(4, 1) });

        let next = run(&UseSkillAction::new(HERO, EntityId(11), Point::new(3, 2)), &state, &env).unwrap();
        assert_eq!(next.player.position, Point::new(3, 2));
    }

    #[test]
    fn stun_and_knockback_apply_to_survivors() {
        let flags = DamageFlags::STUN | DamageFlags::KNOCKBACK;
        let state = duel(skill(
            12,
            SkillEffect::Damage(DamageInfo::new(2).with_flags(flags)),
            TargetInfo::point(5, 0),
        ));
        let config = GameConfig::default();
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);

        let next = run(&UseSkillAction::new(HERO, EntityId(12), Point::new(4, 1)), &state, &env).unwrap();
        let goblin = &next.enemies[0];
        assert_eq!(goblin.ct, -200);
        assert_eq!(goblin.position, Point::new(5, 1));
        assert_eq!(recorder.kinds(), vec!["projectile", "movement"]);
    }

    #[test]
    fn knockback_into_wall_or_occupied_tile_holds_position() {
        let shove = skill(
            12,
            SkillEffect::Damage(DamageInfo::new(2).with_flags(DamageFlags::KNOCKBACK)),
            TargetInfo::point(5, 0),
        );
        let config = GameConfig::default();

        let mut against_wall = duel(shove.clone());
        against_wall.enemies[0].position = Point::new(6, 1);
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);
        let next = run(&UseSkillAction::new(HERO, EntityId(12), Point::new(6, 1)), &against_wall, &env).unwrap();
        assert_eq!(next.enemies[0].position, Point::new(6, 1));
        assert_eq!(next.enemies[0].health.current, 8);
        assert_eq!(recorder.kinds(), vec!["projectile"]);

        let rat = Character::new(EntityId(3), "Rat", Point::new(5, 1), Health::full(3));
        let crowded = duel(shove).with_enemies(vec![
            Character::new(GOBLIN, "Goblin", Point::new(4, 1), Health::full(10)),
            rat,
        ]);
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);
        let next = run(&UseSkillAction::new(HERO, EntityId(12), Point::new(4, 1)), &crowded, &env).unwrap();
        assert_eq!(next.enemies[0].position, Point::new(4, 1));
        assert_eq!(next.enemies[0].health.current, 8);
        assert_eq!(next.enemies[1].position, Point::new(5, 1));
        assert_eq!(next.enemies[1].health.current, 3);
        assert_eq!(recorder.kinds(), vec!["projectile"]);
    }

    #[test]
    fn cone_hits_every_character_in_the_sweep() {
        let breath = skill(18, SkillEffect::Damage(DamageInfo::new(3)), TargetInfo::cone(2));
        let hero = Character::player(HERO, "Hero", Point::new(3, 3), Health::full(10))
            .with_ct(100)
            .with_skill(breath);
        let state = GameState::new(Map::box_room(7, 7), hero).with_enemies(vec![
            Character::new(GOBLIN, "Goblin", Point::new(3, 2), Health::full(10)),
            Character::new(EntityId(3), "Rat", Point::new(4, 1), Health::full(10)),
            Character::new(EntityId(4), "Bat", Point::new(5, 3), Health::full(10)),
        ]);
        let config = GameConfig::default();
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);

        let next = run(&UseSkillAction::new(HERO, EntityId(18), Point::new(3, 2)), &state, &env).unwrap();
        let health: Vec<i32> = next.enemies.iter().map(|c| c.health.current).collect();
        assert_eq!(health, vec![7, 7, 10]);
        assert_eq!(recorder.kinds(), vec!["cone"]);
    }

    #[test]
    fn line_hits_along_the_ray_and_pushes_farthest_first() {
        let lance = skill(
            19,
            SkillEffect::Damage(DamageInfo::new(2).with_flags(DamageFlags::KNOCKBACK)),
            TargetInfo::line(3),
        );
        let hero = Character::player(HERO, "Hero", Point::new(1, 1), Health::full(10))
            .with_ct(100)
            .with_skill(lance);
        let state = GameState::new(Map::box_room(9, 3), hero).with_enemies(vec![
            Character::new(GOBLIN, "Goblin", Point::new(2, 1), Health::full(10)),
            Character::new(EntityId(3), "Rat", Point::new(4, 1), Health::full(10)),
            Character::new(EntityId(4), "Bat", Point::new(6, 1), Health::full(10)),
        ]);
        let config = GameConfig::default();
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);

        let next = run(&UseSkillAction::new(HERO, EntityId(19), Point::new(7, 1)), &state, &env).unwrap();
        let summary: Vec<(Point, i32)> = next
            .enemies
            .iter()
            .map(|c| (c.position, c.health.current))
            .collect();
        assert_eq!(
            summary,
            vec![(Point::new(3, 1), 8), (Point::new(5, 1), 8), (Point::new(6, 1), 10)]
        );
        assert_eq!(
            recorder.kinds(),
            vec!["specific_area_explosion", "movement", "movement"]
        );
    }

    #[test]
    fn charge_moves_invoker_next_to_target() {
        let state = duel(skill(
            13,
            SkillEffect::Damage(DamageInfo::new(1).with_flags(DamageFlags::CHARGE)),
            TargetInfo::point(5, 0),
        ));
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let next = run(&UseSkillAction::new(HERO, EntityId(13), Point::new(4, 1)), &state, &env).unwrap();
        assert_eq!(next.player.position, Point::new(3, 1));
        assert_eq!(next.enemies[0].health.current, 9);
    }

    #[test]
    fn delayed_damage_plants_a_script_and_starts_cooldown() {
        let blast = skill(14, SkillEffect::DelayedDamage { power: 3 }, TargetInfo::point(5, 1))
            .with_resources(SkillResources::with_cooldown(5));
        let state = duel(blast);
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let next = run(&UseSkillAction::new(HERO, EntityId(14), Point::new(4, 1)), &state, &env).unwrap();
        assert_eq!(next.enemies[0].health.current, 10);
        assert_eq!(next.scripts.len(), 2);
        match &next.scripts[0] {
            MapScript::AreaDamage(script) => {
                assert_eq!(script.ct, -100);
                assert_eq!(script.damage, 3);
                assert!(script.area.contains(&Point::new(4, 1)));
            }
            other => panic!("unexpected script {other:?}"),
        }
        assert!(matches!(next.scripts[1], MapScript::ReduceCooldown(_)));
        assert!(!next.player.skills[0].ready_for_use());
    }

    #[test]
    fn leap_strikes_closest_opponent() {
        let leap = skill(
            15,
            SkillEffect::MoveAndDamageClosest { power: 3, range: 3 },
            TargetInfo::point(4, 0),
        );
        let state = duel(leap);
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let next = run(&UseSkillAction::new(HERO, EntityId(15), Point::new(2, 2)), &state, &env).unwrap();
        assert_eq!(next.player.position, Point::new(2, 2));
        assert_eq!(next.enemies[0].health.current, 7);
    }

    #[test]
    fn leap_skips_opponents_behind_walls() {
        let map = Map::from_rows(&[
            "#########",
            "#.......#",
            "#.#.....#",
            "#.......#",
            "#########",
        ])
        .unwrap();
        let leap = skill(
            15,
            SkillEffect::MoveAndDamageClosest { power: 3, range: 4 },
            TargetInfo::point(3, 0),
        );
        let hero = Character::player(HERO, "Hero", Point::new(1, 1), Health::full(10))
            .with_ct(100)
            .with_skill(leap);
        let state = GameState::new(map, hero).with_enemies(vec![
            Character::new(GOBLIN, "Goblin", Point::new(3, 1), Health::full(10)),
            Character::new(EntityId(3), "Rat", Point::new(4, 3), Health::full(10)),
        ]);
        let config = GameConfig::default();
        let recorder = Recorder::default();
        let env = GameEnv::new(&config).with_animations(&recorder);

        let next = run(&UseSkillAction::new(HERO, EntityId(15), Point::new(1, 3)), &state, &env).unwrap();
        assert_eq!(next.player.position, Point::new(1, 3));
        assert_eq!(next.enemies[0].health.current, 10);
        assert_eq!(next.enemies[1].health.current, 7);
        assert_eq!(recorder.kinds(), vec!["projectile"]);
    }

    #[test]
    fn heal_only_touches_allies() {
        let mend = skill(16, SkillEffect::Heal { power: 5 }, TargetInfo::point(5, 3));
        let mut state = duel(mend);
        state.player.health = Health::new(8, 10);
        state.enemies[0].health = Health::new(2, 10);
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let next = run(&UseSkillAction::new(HERO, EntityId(16), Point::new(2, 1)), &state, &env).unwrap();
        assert_eq!(next.player.health.current, 10);
        assert_eq!(next.enemies[0].health.current, 2);
    }

    #[test]
    fn defense_absorbs_hits() {
        let mut state = duel(skill(17, SkillEffect::Damage(DamageInfo::new(5)), TargetInfo::point(5, 0)));
        state.enemies[0].defense = Defense::new(10);
        let config = GameConfig::default();
        let env = GameEnv::new(&config);

        let next = run(&UseSkillAction::new(HERO, EntityId(17), Point::new(4, 1)), &state, &env).unwrap();
        assert_eq!(next.enemies[0].health.current, 10);
    }
}
