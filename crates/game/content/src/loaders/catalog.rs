//! Character and skill catalog loader.

use std::path::Path;

use crate::library::ContentLibrary;
use crate::loaders::{LoadResult, read_file};
use crate::templates::{CharacterTemplate, SkillTemplate};

/// Loader for template catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load character templates from a RON file.
    ///
    /// RON format: `Vec<CharacterTemplate>`
    pub fn load_characters(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse character catalog RON at {}: {}", path.display(), e)
        })
    }

    /// Load skill templates from a RON file.
    ///
    /// RON format: `Vec<SkillTemplate>`
    pub fn load_skills(path: &Path) -> LoadResult<Vec<SkillTemplate>> {
        let content = read_file(path)?;
        ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse skill catalog RON at {}: {}", path.display(), e)
        })
    }

    /// Builds the library from the catalogs embedded in this crate.
    pub fn builtin() -> LoadResult<ContentLibrary> {
        let characters: Vec<CharacterTemplate> = ron::from_str(include_str!("../../data/characters.ron"))
            .map_err(|e| anyhow::anyhow!("Failed to parse characters.ron: {}", e))?;
        let skills: Vec<SkillTemplate> = ron::from_str(include_str!("../../data/skills.ron"))
            .map_err(|e| anyhow::anyhow!("Failed to parse skills.ron: {}", e))?;
        Ok(ContentLibrary::from_templates(characters, skills)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{
        ContentOracle, DamageFlags, IdAllocator, Point, SkillEffect, TargettingStyle,
    };

    #[test]
    fn builtin_catalogs_load() {
        let library = CatalogLoader::builtin().expect("Failed to load builtin catalogs");

        let hero = library.character_template("Hero").unwrap();
        assert!(hero.is_player);
        assert_eq!(hero.skills.len(), 5);

        let bash = library.skill_template("Shield Bash").unwrap();
        match bash.effect {
            SkillEffect::Damage(info) => {
                assert_eq!(info.flags, DamageFlags::STUN | DamageFlags::KNOCKBACK)
            }
            other => panic!("unexpected effect {other:?}"),
        }

        let mortar = library.skill_template("Mortar").unwrap();
        assert_eq!(mortar.effect, SkillEffect::DelayedDamage { power: 5 });
        assert_eq!(mortar.target_info.area, 1);
        assert!(mortar.resources.recharged_ammo_on_cooldown);

        assert_eq!(
            library.skill_template("Slash").unwrap().target_info.style,
            TargettingStyle::Cone
        );
    }

    #[test]
    fn every_builtin_character_can_be_created() {
        let library = CatalogLoader::builtin().unwrap();
        let names: Vec<String> = library.character_names().map(str::to_owned).collect();
        let mut ids = IdAllocator::new();
        for name in names {
            let character = library
                .create_character(&mut ids, &name, Point::new(1, 1))
                .unwrap();
            assert!(!character.skills.is_empty(), "{name} has no skills");
        }
    }

    #[test]
    fn files_on_disk_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.ron");
        std::fs::write(
            &path,
            r#"[(name: "Poke", effect: Damage((power: 1)), target_info: (style: Point, range: 1))]"#,
        )
        .unwrap();

        let skills = CatalogLoader::load_skills(&path).unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].resources, Default::default());

        let missing = CatalogLoader::load_characters(&dir.path().join("nope.ron"));
        assert!(missing.unwrap_err().to_string().contains("nope.ron"));
    }
}
