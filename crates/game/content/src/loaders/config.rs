//! Game configuration loader.

use std::path::Path;

use arena_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys fall back to [`GameConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::parse("enemy_self_heal = true\nstun_ct_penalty = 150\n").unwrap();
        assert!(config.enemy_self_heal);
        assert_eq!(config.stun_ct_penalty, 150);
        assert_eq!(config.delayed_damage_start_ct, GameConfig::DEFAULT_DELAYED_DAMAGE_START_CT);
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(ConfigLoader::parse("visibility_radius = \"far\"").is_err());
    }

    #[test]
    fn shipped_config_parses() {
        let config = ConfigLoader::parse(include_str!("../../data/config.toml")).unwrap();
        assert_eq!(config.max_scheduler_steps, GameConfig::DEFAULT_MAX_SCHEDULER_STEPS);
    }
}
