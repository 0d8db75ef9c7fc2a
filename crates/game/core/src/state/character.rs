use crate::geometry::Point;

use super::{Defense, EntityId, Health, Skill};

/// Player or enemy combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub position: Point,
    /// Charge time. The character may act once this reaches 100.
    pub ct: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
    pub health: Health,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: Defense,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_player: bool,
}

impl Character {
    pub fn new(id: EntityId, name: impl Into<String>, position: Point, health: Health) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            ct: 0,
            skills: Vec::new(),
            health,
            defense: Defense::NONE,
            is_player: false,
        }
    }

    pub fn player(id: EntityId, name: impl Into<String>, position: Point, health: Health) -> Self {
        Self {
            is_player: true,
            ..Self::new(id, name, position, health)
        }
    }

    // ===== copy-producing updates =====

    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_ct(mut self, ct: i32) -> Self {
        self.ct = ct;
        self
    }

    #[must_use]
    pub fn with_added_ct(mut self, amount: i32) -> Self {
        self.ct += amount;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: Defense) -> Self {
        self.defense = defense;
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Replaces the owned skill sharing `skill.id`. Unknown skills are ignored.
    #[must_use]
    pub fn with_updated_skill(mut self, skill: Skill) -> Self {
        if let Some(slot) = self.skills.iter_mut().find(|s| s.id == skill.id) {
            *slot = skill;
        }
        self
    }

    // ===== queries =====

    pub fn skill(&self, id: EntityId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub(crate) fn skill_mut(&mut self, id: EntityId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    pub fn owns_skill(&self, id: EntityId) -> bool {
        self.skill(id).is_some()
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Player and enemies are on opposite sides.
    pub fn is_ally_of(&self, other: &Character) -> bool {
        self.is_player == other.is_player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SkillEffect, TargetInfo};

    fn goblin() -> Character {
        Character::new(EntityId(2), "Goblin", Point::new(3, 3), Health::full(10))
    }

    #[test]
    fn with_updates_leave_the_original_untouched() {
        let original = goblin();
        let moved = original.clone().with_position(Point::new(2, 2)).with_added_ct(30);
        assert_eq!(original.position, Point::new(3, 3));
        assert_eq!(original.ct, 0);
        assert_eq!(moved.position, Point::new(2, 2));
        assert_eq!(moved.ct, 30);
    }

    #[test]
    fn updated_skill_replaces_by_id() {
        let skill = Skill::new(EntityId(7), "Bite", SkillEffect::None, TargetInfo::NONE);
        let renamed = Skill {
            name: "Gnaw".into(),
            ..skill.clone()
        };
        let character = goblin().with_skill(skill).with_updated_skill(renamed);
        assert_eq!(character.skill(EntityId(7)).map(|s| s.name.as_str()), Some("Gnaw"));
        assert!(!character.owns_skill(EntityId(8)));
    }

    #[test]
    fn sides_follow_player_flag() {
        let hero = Character::player(EntityId(1), "Hero", Point::new(1, 1), Health::full(20));
        assert!(!hero.is_ally_of(&goblin()));
        assert!(goblin().is_ally_of(&goblin()));
    }
}
