//! End-to-end rule scenarios driven through the engine facade.

use std::sync::Mutex;

use arena_core::{
    Action, AnimationInfo, AnimationSink, ArenaEngine, Character, ContentOracle, DamageInfo,
    Direction, EntityId, ExecuteError, GameConfig, GameEnv, GameError, GameState, Health,
    IdAllocator, Map, MapScript, MoveAction, OracleError, Point, Skill, SkillEffect,
    SkillResources, SpawnerScript, TargetInfo, TransitionPhase, UseSkillAction, WaitAction,
};

const HERO: EntityId = EntityId(1);
const GOBLIN: EntityId = EntityId(2);

#[derive(Default)]
struct Recorder {
    animations: Mutex<Vec<AnimationInfo>>,
    deaths: Mutex<u32>,
    rounds: Mutex<Vec<u32>>,
}

impl Recorder {
    fn count(&self, kind: &str) -> usize {
        self.animations
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.kind_name() == kind)
            .count()
    }
}

impl AnimationSink for Recorder {
    fn request_animation(&self, _state: &GameState, animation: &AnimationInfo) {
        self.animations.lock().unwrap().push(animation.clone());
    }

    fn request_player_dead(&self, _state: &GameState) {
        *self.deaths.lock().unwrap() += 1;
    }

    fn request_new_round(&self, _state: &GameState, round: u32) {
        self.rounds.lock().unwrap().push(round);
    }
}

struct Bestiary;

impl ContentOracle for Bestiary {
    fn create_character(
        &self,
        ids: &mut IdAllocator,
        name: &str,
        position: Point,
    ) -> Result<Character, OracleError> {
        match name {
            "Rat" => Ok(Character::new(ids.allocate(), name, position, Health::full(2))),
            other => Err(OracleError::CharacterTemplateNotFound(other.to_string())),
        }
    }

    fn create_skill(&self, _ids: &mut IdAllocator, name: &str) -> Result<Skill, OracleError> {
        Err(OracleError::SkillTemplateNotFound(name.to_string()))
    }
}

fn hero(ct: i32) -> Character {
    Character::player(HERO, "Hero", Point::new(1, 1), Health::full(10)).with_ct(ct)
}

fn goblin(position: Point, ct: i32) -> Character {
    Character::new(GOBLIN, "Goblin", position, Health::full(10)).with_ct(ct)
}

fn wait() -> Action {
    Action::Wait(WaitAction::new(HERO))
}

#[test]
fn enemy_walks_toward_player_then_holds() {
    let config = GameConfig::default();
    let recorder = Recorder::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_animations(&recorder));
    let state = GameState::new(Map::box_room(5, 5), hero(90))
        .with_enemies(vec![goblin(Point::new(3, 3), 100)]);

    let state = engine.process_until_player_ready(&state).unwrap();
    assert_eq!(state.enemies[0].position, Point::new(2, 2));
    assert_eq!(state.player.ct, 100);
    assert_eq!(state.enemies[0].ct, 10);
    assert_eq!(state.round, 1);
    assert_eq!(recorder.count("movement"), 1);

    let state = engine.act_player(&state, &wait()).unwrap();
    assert_eq!(state.enemies[0].position, Point::new(2, 2));
    assert_eq!(state.player.ct, 100);
    assert_eq!(recorder.count("movement"), 1);
    assert_eq!(*recorder.rounds.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn boxed_in_enemy_waits() {
    let map = Map::from_rows(&[
        "#######",
        "#...#.#",
        "#...###",
        "#######",
    ])
    .unwrap();
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let state = GameState::new(map, hero(0)).with_enemies(vec![goblin(Point::new(5, 1), 100)]);

    let next = engine.take_actor_turn(&state, GOBLIN).unwrap();
    assert_eq!(next.enemies[0].position, Point::new(5, 1));
    assert_eq!(next.enemies[0].ct, 0);
}

#[test]
fn physics_blocks_and_charges() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let state = GameState::new(Map::box_room(5, 5), hero(100))
        .with_enemies(vec![goblin(Point::new(2, 2), 0)]);

    let blocked = engine
        .execute(&state, &Action::Move(MoveAction::new(HERO, Direction::SouthEast)))
        .unwrap();
    assert_eq!(blocked, state);

    let wall = engine
        .execute(&state, &Action::Move(MoveAction::new(HERO, Direction::North)))
        .unwrap();
    assert_eq!(wall.player.position, Point::new(1, 1));
    assert_eq!(wall.player.ct, 100);

    let moved = engine
        .execute(&state, &Action::Move(MoveAction::new(HERO, Direction::East)))
        .unwrap();
    assert_eq!(moved.player.position, Point::new(2, 1));
    assert_eq!(moved.player.ct, 0);
    assert_eq!(state.player.position, Point::new(1, 1));
}

#[test]
fn overdraft_is_an_invalid_operation() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let state = GameState::new(Map::box_room(5, 5), hero(40));

    let err = engine.execute(&state, &wait()).unwrap_err();
    assert!(err.is_invalid_operation());
    assert_eq!(err.phase(), Some(TransitionPhase::Apply));
}

#[test]
fn spawner_releases_two_rats_over_eleven_turns() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_content(&Bestiary));
    let spawner = EntityId(9);
    let mut state = GameState::new(Map::box_room(7, 7), hero(0))
        .with_scripts(vec![SpawnerScript::new(spawner, Point::new(4, 4), "Rat", 2, 2).into()])
        .with_ids(IdAllocator::starting_at(10));

    let mut counts = Vec::new();
    for _ in 0..11 {
        let ready = state
            .scripts
            .iter()
            .cloned()
            .map(|s| s.with_ct(100))
            .collect::<Vec<MapScript>>();
        let next = engine.take_script_turn(&state.clone().with_scripts(ready), spawner).unwrap();
        counts.push(next.enemies.len());
        state = next.with_enemies(Vec::new());
    }
    assert_eq!(counts, vec![0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0]);
}

#[test]
fn unknown_spawn_template_is_fatal() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_content(&Bestiary));
    let state = GameState::new(Map::box_room(7, 7), hero(0)).with_scripts(vec![
        MapScript::from(SpawnerScript::new(EntityId(9), Point::new(4, 4), "Dragon", 0, 1)).with_ct(100),
    ]);

    let err = engine.process_until_player_ready(&state).unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::Script(arena_core::ScriptError::Oracle(OracleError::CharacterTemplateNotFound(_)))
    ));
    assert!(!err.is_invalid_operation());
}

#[test]
fn delayed_blast_lands_after_three_wait_cycles() {
    let config = GameConfig::default();
    let recorder = Recorder::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_animations(&recorder));
    let blast = Skill::new(
        EntityId(20),
        "Blast",
        SkillEffect::DelayedDamage { power: 3 },
        TargetInfo::point(5, 1),
    )
    .with_resources(SkillResources::with_cooldown(5));
    let state = GameState::new(Map::box_room(9, 5), hero(100))
        .with_enemies(vec![goblin(Point::new(5, 1), 100).with_skill(blast)])
        .with_ids(IdAllocator::starting_at(30));

    let after_one = engine.act_player(&state, &wait()).unwrap();
    assert_eq!(after_one.player.health.current, 10);
    assert!(!after_one.enemies[0].skills[0].ready_for_use());
    assert!(after_one.scripts.iter().any(|s| matches!(s, MapScript::AreaDamage(_))));
    assert!(after_one.log_entries.contains(&"Goblin uses Blast.".to_string()));

    let after_two = engine.act_player(&after_one, &wait()).unwrap();
    assert_eq!(after_two.player.health.current, 10);
    assert_eq!(recorder.count("specific_area_explosion"), 0);

    let after_three = engine.act_player(&after_two, &wait()).unwrap();
    assert_eq!(after_three.player.health.current, 7);
    assert_eq!(recorder.count("specific_area_explosion"), 1);
    assert!(!after_three.scripts.iter().any(|s| matches!(s, MapScript::AreaDamage(_))));
}

#[test]
fn player_death_is_signalled_once_and_player_stays() {
    let config = GameConfig::default();
    let recorder = Recorder::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_animations(&recorder));
    let club = Skill::new(
        EntityId(21),
        "Club",
        SkillEffect::Damage(DamageInfo::new(6)),
        TargetInfo::point(1, 0),
    );
    let state = GameState::new(Map::box_room(5, 5), hero(0))
        .with_enemies(vec![goblin(Point::new(2, 1), 100).with_skill(club)]);

    let state = engine.process_until_player_ready(&state).unwrap();
    assert_eq!(state.player.health.current, 4);
    let state = engine.act_player(&state, &wait()).unwrap();
    assert_eq!(state.player.health.current, -2);
    let state = engine.act_player(&state, &wait()).unwrap();

    assert_eq!(*recorder.deaths.lock().unwrap(), 1);
    assert_eq!(state.player.id, HERO);
    assert_eq!(
        state.log_entries.iter().filter(|l| *l == "Hero has fallen.").count(),
        1
    );
}

#[test]
fn failed_player_command_changes_nothing() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let bolt = Skill::new(
        EntityId(22),
        "Bolt",
        SkillEffect::Damage(DamageInfo::new(3)),
        TargetInfo::point(2, 0),
    );
    let state = GameState::new(Map::box_room(9, 9), hero(100).with_skill(bolt))
        .with_enemies(vec![goblin(Point::new(6, 6), 0)]);

    let far = Action::UseSkill(UseSkillAction::new(HERO, EntityId(22), Point::new(6, 6)));
    let err = engine.act_player(&state, &far).unwrap_err();
    assert!(err.is_invalid_operation());
    assert_eq!(err.phase(), Some(TransitionPhase::PreValidate));
    assert!(!engine.is_valid_target_for_skill(&state, HERO, EntityId(22), Point::new(6, 6)));

    let impostor = Action::Wait(WaitAction::new(GOBLIN));
    assert_eq!(
        engine.act_player(&state, &impostor),
        Err(ExecuteError::NotPlayerAction { actor: GOBLIN, player: HERO })
    );
}

#[test]
fn queries_mirror_targeting_rules() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let nova = Skill::new(
        EntityId(23),
        "Nova",
        SkillEffect::Damage(DamageInfo::new(1)),
        TargetInfo::point(3, 1),
    );
    let state = GameState::new(Map::box_room(9, 9), hero(100).with_skill(nova));

    let targets = engine.points_skill_can_target(&state, HERO, EntityId(23));
    assert!(targets.contains(&Point::new(4, 1)));
    assert!(!targets.contains(&Point::new(5, 1)));
    assert!(targets.iter().all(|p| engine.is_valid_target_for_skill(&state, HERO, EntityId(23), *p)));

    let area = engine.affected_points_for_skill(&state, HERO, EntityId(23), Point::new(2, 2));
    assert_eq!(area.len(), 5);
    assert!(engine.visibility_for(&state, HERO).is_some_and(|v| v.is_visible(Point::new(7, 7))));
    assert!(engine.could_character_walk(&state, Point::new(2, 2)));
    assert!(!engine.could_character_walk(&state, Point::new(1, 1)));
    assert!(engine.points_skill_can_target(&state, GOBLIN, EntityId(23)).is_empty());
}
