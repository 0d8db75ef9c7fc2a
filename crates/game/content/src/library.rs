//! Template library backing the engine's content oracle.

use std::collections::BTreeMap;

use arena_core::{Character, ContentOracle, IdAllocator, OracleError, Point, Skill, SkillEffect};

use crate::error::ContentError;
use crate::templates::{CharacterTemplate, SkillTemplate};

/// Longest range, area or strike reach a skill template may declare.
pub const MAX_SKILL_REACH: u32 = 64;

/// Validated set of character and skill templates.
///
/// Every skill a character template names is guaranteed to exist, so creating
/// a known character can only fail on an unknown character name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentLibrary {
    characters: BTreeMap<String, CharacterTemplate>,
    skills: BTreeMap<String, SkillTemplate>,
}

impl ContentLibrary {
    /// Builds a library, rejecting duplicates, dangling skill references and
    /// skills reaching further than [`MAX_SKILL_REACH`].
    pub fn from_templates(
        characters: Vec<CharacterTemplate>,
        skills: Vec<SkillTemplate>,
    ) -> Result<Self, ContentError> {
        let mut library = Self::default();

        for skill in skills {
            if library.skills.contains_key(&skill.name) {
                return Err(ContentError::DuplicateSkill(skill.name));
            }
            if let Some(reason) = reach_violation(&skill) {
                return Err(ContentError::InvalidSkill {
                    name: skill.name,
                    reason,
                });
            }
            library.skills.insert(skill.name.clone(), skill);
        }

        for character in characters {
            if library.characters.contains_key(&character.name) {
                return Err(ContentError::DuplicateCharacter(character.name));
            }
            if character.health <= 0 {
                return Err(ContentError::InvalidCharacter {
                    name: character.name,
                    reason: "health must be positive",
                });
            }
            if let Some(missing) = character
                .skills
                .iter()
                .find(|name| !library.skills.contains_key(*name))
            {
                return Err(ContentError::MissingSkill {
                    character: character.name.clone(),
                    skill: missing.clone(),
                });
            }
            library.characters.insert(character.name.clone(), character);
        }

        tracing::debug!(
            characters = library.characters.len(),
            skills = library.skills.len(),
            "content library assembled"
        );
        Ok(library)
    }

    pub fn character_template(&self, name: &str) -> Option<&CharacterTemplate> {
        self.characters.get(name)
    }

    pub fn skill_template(&self, name: &str) -> Option<&SkillTemplate> {
        self.skills.get(name)
    }

    pub fn character_names(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }
}

fn reach_violation(skill: &SkillTemplate) -> Option<&'static str> {
    if skill.target_info.range > MAX_SKILL_REACH {
        return Some("range is too long");
    }
    if skill.target_info.area > MAX_SKILL_REACH {
        return Some("area is too large");
    }
    match skill.effect {
        SkillEffect::MoveAndDamageClosest { range, .. } if range > MAX_SKILL_REACH => {
            Some("strike range is too long")
        }
        _ => None,
    }
}

impl ContentOracle for ContentLibrary {
    fn create_character(
        &self,
        ids: &mut IdAllocator,
        name: &str,
        position: Point,
    ) -> Result<Character, OracleError> {
        let template = self
            .character_template(name)
            .ok_or_else(|| OracleError::CharacterTemplateNotFound(name.to_owned()))?;

        // Character first so its id precedes the ids of its skills.
        let id = ids.allocate();
        let skills = template
            .skills
            .iter()
            .map(|skill| self.create_skill(ids, skill))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(%id, name, x = position.x, y = position.y, "character created");
        Ok(template.instantiate(id, position, skills))
    }

    fn create_skill(&self, ids: &mut IdAllocator, name: &str) -> Result<Skill, OracleError> {
        let template = self
            .skill_template(name)
            .ok_or_else(|| OracleError::SkillTemplateNotFound(name.to_owned()))?;
        Ok(template.instantiate(ids.allocate()))
    }
}
