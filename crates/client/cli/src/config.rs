//! Headless client configuration.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub seed: u64,
    pub map: String,
    /// Player commands to issue before stopping.
    pub turns: u32,
    pub save_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    /// Directory with `config.toml`, `characters.ron` and `skills.ron`.
    pub data_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            map: "pillar_hall".to_owned(),
            turns: 40,
            save_path: None,
            log_dir: None,
            data_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - Map seed (default: 1)
    /// - `ARENA_MAP` - Map generator key (default: pillar_hall)
    /// - `ARENA_TURNS` - Player commands to play (default: 40)
    /// - `ARENA_SAVE_PATH` - Save slot file; resumed from when present
    /// - `ARENA_LOG_DIR` - Directory for a log file in addition to stderr
    /// - `ARENA_DATA_DIR` - Content directory (default: built-in content)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("ARENA_SEED") {
            config.seed = seed;
        }

        if let Ok(map) = env::var("ARENA_MAP")
            && !map.is_empty()
        {
            config.map = map;
        }

        if let Some(turns) = read_env::<u32>("ARENA_TURNS") {
            config.turns = turns;
        }

        config.save_path = env::var("ARENA_SAVE_PATH").ok().map(PathBuf::from);
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);
        config.data_dir = env::var("ARENA_DATA_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
