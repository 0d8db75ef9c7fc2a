//! Authoritative game state representation.
//!
//! [`GameState`] is the aggregate root: map, player, enemies, scripts, combat
//! log and round counter. Callers only ever see whole states; the engine
//! works on a private copy and hands back a new value.
mod character;
mod common;
mod script;
mod skill;

use std::collections::HashSet;
use std::sync::Arc;

use crate::geometry::Point;
use crate::map::Map;

pub use character::Character;
pub use common::{Defense, EntityId, Health, IdAllocator};
pub use script::{AreaDamageScript, MapScript, ReduceCooldownScript, SpawnerScript};
pub use skill::{
    Ammo, DamageFlags, DamageInfo, EffectKind, Skill, SkillEffect, SkillResources, TargetInfo,
    TargettingStyle,
};

/// Identifies anything the scheduler can grant a turn to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimedElement {
    Player,
    Enemy(EntityId),
    Script(EntityId),
}

/// Structural problems found by [`GameState::check_invariants`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("character id {0} is used more than once")]
    DuplicateCharacterId(EntityId),

    #[error("script id {0} is used more than once")]
    DuplicateScriptId(EntityId),

    #[error("character {character} owns skill id {skill} more than once")]
    DuplicateSkillId { character: EntityId, skill: EntityId },

    #[error("character {0} has the wrong player flag for its slot")]
    PlayerFlagMismatch(EntityId),
}

/// Canonical snapshot of the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    map: Arc<Map>,
    pub player: Character,
    /// Ordered for deterministic turn tie-breaks.
    pub enemies: Vec<Character>,
    pub scripts: Vec<MapScript>,
    /// Append-only combat log.
    pub log_entries: Vec<String>,
    pub round: u32,
    ids: IdAllocator,
}

impl GameState {
    pub fn new(map: Map, player: Character) -> Self {
        Self {
            map: Arc::new(map),
            player,
            enemies: Vec::new(),
            scripts: Vec::new(),
            log_entries: Vec::new(),
            round: 0,
            ids: IdAllocator::new(),
        }
    }

    // ===== copy-producing updates =====

    #[must_use]
    pub fn with_map(mut self, map: Map) -> Self {
        self.map = Arc::new(map);
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: Character) -> Self {
        self.player = player;
        self
    }

    #[must_use]
    pub fn with_enemies(mut self, enemies: Vec<Character>) -> Self {
        self.enemies = enemies;
        self
    }

    #[must_use]
    pub fn with_scripts(mut self, scripts: Vec<MapScript>) -> Self {
        self.scripts = scripts;
        self
    }

    #[must_use]
    pub fn with_log_entries(mut self, log_entries: Vec<String>) -> Self {
        self.log_entries = log_entries;
        self
    }

    #[must_use]
    pub fn with_added_log(mut self, line: impl Into<String>) -> Self {
        self.log_entries.push(line.into());
        self
    }

    #[must_use]
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    #[must_use]
    pub fn with_ids(mut self, ids: IdAllocator) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the character sharing `character.id`, player included.
    #[must_use]
    pub fn with_updated_character(mut self, character: Character) -> Self {
        self.update_character(character);
        self
    }

    #[must_use]
    pub fn with_updated_script(mut self, script: MapScript) -> Self {
        self.update_script(script);
        self
    }

    // ===== queries =====

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Player first, then enemies in order.
    pub fn all_characters(&self) -> impl Iterator<Item = &Character> {
        std::iter::once(&self.player).chain(self.enemies.iter())
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.all_characters().find(|c| c.id == id)
    }

    pub fn character_at(&self, point: Point) -> Option<&Character> {
        self.all_characters().find(|c| c.position == point)
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.character_at(point).is_some()
    }

    pub fn script(&self, id: EntityId) -> Option<&MapScript> {
        self.scripts.iter().find(|s| s.id() == id)
    }

    pub fn timed_element_ct(&self, element: TimedElement) -> Option<i32> {
        match element {
            TimedElement::Player => Some(self.player.ct),
            TimedElement::Enemy(id) => self.enemies.iter().find(|c| c.id == id).map(|c| c.ct),
            TimedElement::Script(id) => self.script(id).map(MapScript::ct),
        }
    }

    /// Every timed element with its CT, in tie-break order.
    pub fn timed_elements(&self) -> impl Iterator<Item = (TimedElement, i32)> + '_ {
        std::iter::once((TimedElement::Player, self.player.ct))
            .chain(self.enemies.iter().map(|c| (TimedElement::Enemy(c.id), c.ct)))
            .chain(self.scripts.iter().map(|s| (TimedElement::Script(s.id()), s.ct())))
    }

    /// Verifies identity invariants: unique IDs, player flag placement.
    pub fn check_invariants(&self) -> Result<(), StateError> {
        if !self.player.is_player {
            return Err(StateError::PlayerFlagMismatch(self.player.id));
        }
        let mut seen = HashSet::new();
        for character in self.all_characters() {
            if !seen.insert(character.id) {
                return Err(StateError::DuplicateCharacterId(character.id));
            }
            if character.id != self.player.id && character.is_player {
                return Err(StateError::PlayerFlagMismatch(character.id));
            }
            let mut skills = HashSet::new();
            for skill in &character.skills {
                if !skills.insert(skill.id) {
                    return Err(StateError::DuplicateSkillId {
                        character: character.id,
                        skill: skill.id,
                    });
                }
            }
        }
        let mut scripts = HashSet::new();
        for script in &self.scripts {
            if !scripts.insert(script.id()) {
                return Err(StateError::DuplicateScriptId(script.id()));
            }
        }
        Ok(())
    }

    // ===== engine-internal mutation on a private copy =====

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        self.ids.allocate()
    }

    pub(crate) fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub(crate) fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.enemies.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn update_character(&mut self, character: Character) -> bool {
        match self.character_mut(character.id) {
            Some(slot) => {
                *slot = character;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_enemy(&mut self, id: EntityId) -> Option<Character> {
        let index = self.enemies.iter().position(|c| c.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub(crate) fn script_mut(&mut self, id: EntityId) -> Option<&mut MapScript> {
        self.scripts.iter_mut().find(|s| s.id() == id)
    }

    pub(crate) fn update_script(&mut self, script: MapScript) -> bool {
        match self.script_mut(script.id()) {
            Some(slot) => {
                *slot = script;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_script(&mut self, id: EntityId) -> Option<MapScript> {
        let index = self.scripts.iter().position(|s| s.id() == id)?;
        Some(self.scripts.remove(index))
    }

    pub(crate) fn log(&mut self, line: impl Into<String>) {
        self.log_entries.push(line.into());
    }

    /// Adds `amount` CT to every timed element.
    pub(crate) fn advance_all(&mut self, amount: i32) {
        self.player.ct += amount;
        for enemy in &mut self.enemies {
            enemy.ct += amount;
        }
        for script in &mut self.scripts {
            *script.ct_mut() += amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> GameState {
        let player = Character::player(EntityId(1), "Hero", Point::new(1, 1), Health::full(20));
        let goblin = Character::new(EntityId(2), "Goblin", Point::new(3, 3), Health::full(5));
        GameState::new(Map::box_room(5, 5), player)
            .with_enemies(vec![goblin])
            .with_ids(IdAllocator::starting_at(3))
    }

    #[test]
    fn lookups_cover_player_and_enemies() {
        let state = arena();
        assert_eq!(state.character(EntityId(1)).map(|c| c.is_player), Some(true));
        assert_eq!(state.character_at(Point::new(3, 3)).map(|c| c.id), Some(EntityId(2)));
        assert!(!state.is_occupied(Point::new(2, 2)));
    }

    #[test]
    fn updates_return_new_values() {
        let state = arena();
        let moved = state
            .player
            .clone()
            .with_position(Point::new(2, 1));
        let next = state.clone().with_updated_character(moved);
        assert_eq!(state.player.position, Point::new(1, 1));
        assert_eq!(next.player.position, Point::new(2, 1));
    }

    #[test]
    fn timed_elements_list_player_first() {
        let state = arena().with_scripts(vec![
            SpawnerScript::new(EntityId(9), Point::new(2, 2), "Rat", 1, 1).into(),
        ]);
        let elements: Vec<TimedElement> = state.timed_elements().map(|(e, _)| e).collect();
        assert_eq!(
            elements,
            vec![
                TimedElement::Player,
                TimedElement::Enemy(EntityId(2)),
                TimedElement::Script(EntityId(9)),
            ]
        );
    }

    #[test]
    fn invariants_reject_duplicate_ids() {
        let state = arena();
        assert_eq!(state.check_invariants(), Ok(()));

        let clone = state.enemies[0].clone();
        let broken = state.clone().with_enemies(vec![clone.clone(), clone]);
        assert_eq!(
            broken.check_invariants(),
            Err(StateError::DuplicateCharacterId(EntityId(2)))
        );

        let imposter = state.player.clone().with_position(Point::new(2, 2));
        let imposter = Character {
            id: EntityId(5),
            ..imposter
        };
        let broken = state.with_enemies(vec![imposter]);
        assert_eq!(
            broken.check_invariants(),
            Err(StateError::PlayerFlagMismatch(EntityId(5)))
        );
    }
}
