//! Persisted match format.
//!
//! The map is stored as its generator key and seed and rebuilt on load. JSON
//! shape:
//!
//! ```json
//! {
//!   "version": 1,
//!   "map": { "generator": "box_room", "seed": 7 },
//!   "round": 12,
//!   "next_id": 31,
//!   "player": { ... },
//!   "enemies": [ ... ],
//!   "scripts": [ ... ],
//!   "log": [ "..." ]
//! }
//! ```
//!
//! `round`, `enemies`, `scripts` and `log` may be missing or `null`; they load
//! as zero and empty collections.

use arena_core::{Character, GameState, GeneratorOracle, IdAllocator, MapOrigin, MapScript};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, RuntimeError};

pub const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub map: MapOrigin,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round: u32,
    pub next_id: u32,
    pub player: Character,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enemies: Vec<Character>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scripts: Vec<MapScript>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log: Vec<String>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SaveGame {
    /// Snapshots `state`. Only generated maps can be saved.
    pub fn capture(state: &GameState) -> Result<Self> {
        let origin = state.map().origin().ok_or(RuntimeError::MissingMapOrigin)?;
        Ok(Self {
            version: SAVE_VERSION,
            map: origin.clone(),
            round: state.round,
            next_id: state.ids().peek(),
            player: state.player.clone(),
            enemies: state.enemies.clone(),
            scripts: state.scripts.clone(),
            log: state.log_entries.clone(),
        })
    }

    /// Rebuilds the match, regenerating the map from its recorded seed.
    ///
    /// The id allocator resumes past every id the save mentions, even when the
    /// recorded `next_id` is stale.
    pub fn restore(self, generators: &dyn GeneratorOracle) -> Result<GameState> {
        if self.version != SAVE_VERSION {
            return Err(RuntimeError::SaveVersionMismatch {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }

        let generator = generators.map_generator(&self.map.generator)?;
        let map = generator.regenerate(self.map.seed);
        let next_id = self.next_id.max(self.highest_id().saturating_add(1));

        let state = GameState::new(map, self.player)
            .with_enemies(self.enemies)
            .with_scripts(self.scripts)
            .with_log_entries(self.log)
            .with_round(self.round)
            .with_ids(IdAllocator::starting_at(next_id));
        state.check_invariants()?;
        Ok(state)
    }

    fn highest_id(&self) -> u32 {
        let characters = std::iter::once(&self.player).chain(&self.enemies);
        let character_ids = characters
            .clone()
            .map(|c| c.id.0)
            .chain(characters.flat_map(|c| c.skills.iter().map(|s| s.id.0)));
        character_ids
            .chain(self.scripts.iter().map(|s| s.id().0))
            .max()
            .unwrap_or(0)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Parses a save, rejecting other format versions before reading the body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let probe: VersionProbe = serde_json::from_slice(bytes)?;
        if probe.version != SAVE_VERSION {
            return Err(RuntimeError::SaveVersionMismatch {
                found: probe.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}
