//! Serializable character and skill templates.

use arena_core::{
    Character, Defense, EntityId, Health, Point, Skill, SkillEffect, SkillResources, TargetInfo,
};
use serde::{Deserialize, Serialize};

/// Blueprint for a [`Skill`]. The identifier is assigned on instantiation.
///
/// ```ron
/// (
///     name: "Fire Bolt",
///     effect: Damage((power: 4)),
///     target_info: (style: Point, range: 5),
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub name: String,
    pub effect: SkillEffect,
    pub target_info: TargetInfo,
    #[serde(default)]
    pub resources: SkillResources,
}

impl SkillTemplate {
    pub fn instantiate(&self, id: EntityId) -> Skill {
        Skill::new(id, self.name.clone(), self.effect, self.target_info).with_resources(self.resources)
    }
}

/// Blueprint for a [`Character`]; skills are referenced by template name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    pub name: String,
    pub health: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_player: bool,
}

impl CharacterTemplate {
    /// Builds the character with already-instantiated skills.
    pub fn instantiate(&self, id: EntityId, position: Point, skills: Vec<Skill>) -> Character {
        let health = Health::full(self.health);
        let character = if self.is_player {
            Character::player(id, self.name.clone(), position, health)
        } else {
            Character::new(id, self.name.clone(), position, health)
        };
        character
            .with_defense(Defense::new(self.defense))
            .with_skills(skills)
    }
}
