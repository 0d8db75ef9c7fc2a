use std::sync::Mutex;

use arena_core::{
    AnimationInfo, AnimationSink, ArenaEngine, Character, EntityId, ExecuteError, GameConfig,
    GameEnv, GameState, Health, Map, Point,
};

/// Records which character moved, in order.
#[derive(Default)]
struct MoveLog(Mutex<Vec<EntityId>>);

impl MoveLog {
    fn movers(&self) -> Vec<EntityId> {
        self.0.lock().unwrap().clone()
    }
}

impl AnimationSink for MoveLog {
    fn request_animation(&self, _state: &GameState, animation: &AnimationInfo) {
        if let AnimationInfo::Movement { character, .. } = animation {
            self.0.lock().unwrap().push(*character);
        }
    }

    fn request_player_dead(&self, _state: &GameState) {}
}

fn hero(ct: i32) -> Character {
    Character::player(EntityId(1), "Hero", Point::new(1, 1), Health::full(10)).with_ct(ct)
}

fn goblin(id: u32, position: Point, ct: i32) -> Character {
    Character::new(EntityId(id), "Goblin", position, Health::full(5)).with_ct(ct)
}

#[test]
fn every_ready_enemy_acts_once_before_player() {
    let config = GameConfig::default();
    let log = MoveLog::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_animations(&log));
    let state = GameState::new(Map::box_room(9, 9), hero(90)).with_enemies(vec![
        goblin(2, Point::new(7, 1), 100),
        goblin(3, Point::new(7, 4), 100),
        goblin(4, Point::new(7, 7), 100),
    ]);

    let next = engine.process_until_player_ready(&state).unwrap();
    assert_eq!(log.movers(), vec![EntityId(2), EntityId(3), EntityId(4)]);
    assert_eq!(next.player.ct, 100);
    for (before, after) in state.enemies.iter().zip(&next.enemies) {
        assert_ne!(before.position, after.position);
        assert_eq!(after.ct, 10);
    }
}

#[test]
fn higher_ct_goes_first() {
    let config = GameConfig::default();
    let log = MoveLog::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_animations(&log));
    let state = GameState::new(Map::box_room(9, 9), hero(0)).with_enemies(vec![
        goblin(2, Point::new(7, 1), 110),
        goblin(3, Point::new(7, 7), 130),
    ]);

    engine.process_until_player_ready(&state).unwrap();
    assert_eq!(log.movers()[..2], [EntityId(3), EntityId(2)]);
}

#[test]
fn player_wins_ties() {
    let config = GameConfig::default();
    let log = MoveLog::default();
    let engine = ArenaEngine::new(GameEnv::new(&config).with_animations(&log));
    let state = GameState::new(Map::box_room(9, 9), hero(100))
        .with_enemies(vec![goblin(2, Point::new(7, 7), 100)]);

    let next = engine.process_until_player_ready(&state).unwrap();
    assert_eq!(next, state);
    assert!(log.movers().is_empty());
}

#[test]
fn time_advances_in_whole_ticks() {
    let config = GameConfig::default();
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let state = GameState::new(Map::box_room(9, 9), hero(33))
        .with_enemies(vec![goblin(2, Point::new(7, 7), 12)]);

    let next = engine.process_until_player_ready(&state).unwrap();
    assert_eq!(next.player.ct, 103);
    assert_eq!(next.enemies[0].ct, 82);
    assert_eq!(next.round, 1);
}

#[test]
fn runaway_scheduler_is_reported() {
    let config = GameConfig::default().with_max_scheduler_steps(2);
    let engine = ArenaEngine::new(GameEnv::new(&config));
    let state = GameState::new(Map::box_room(9, 9), hero(0)).with_enemies(vec![
        goblin(2, Point::new(7, 1), 100),
        goblin(3, Point::new(7, 4), 100),
        goblin(4, Point::new(7, 7), 100),
    ]);

    assert_eq!(
        engine.process_until_player_ready(&state),
        Err(ExecuteError::SchedulerStalled { steps: 2 })
    );
}
