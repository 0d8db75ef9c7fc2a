use crate::geometry::Point;
use crate::map::Map;
use crate::state::{Character, IdAllocator, MapScript, Skill};

use super::OracleError;

/// Character and skill template library.
///
/// Created entities take fresh identifiers from the caller's allocator so IDs
/// stay unique across the whole match. Unknown names are configuration bugs.
pub trait ContentOracle: Send + Sync {
    fn create_character(
        &self,
        ids: &mut IdAllocator,
        name: &str,
        position: Point,
    ) -> Result<Character, OracleError>;

    fn create_skill(&self, ids: &mut IdAllocator, name: &str) -> Result<Skill, OracleError>;
}

/// Output of a map generator: terrain plus the scripts seeded with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub map: Map,
    pub scripts: Vec<MapScript>,
    /// Walkable tile reserved for the player.
    pub player_start: Point,
}

/// Deterministic map producer keyed by seed.
pub trait MapGenerator: Send + Sync {
    /// Registry key, also recorded in the map's origin.
    fn key(&self) -> &str;

    /// Builds terrain and initial scripts for a new match.
    fn generate(&self, seed: u64, ids: &mut IdAllocator) -> GeneratedMap;

    /// Rebuilds the same terrain from a saved seed.
    fn regenerate(&self, seed: u64) -> Map;
}

/// Lookup of map generators by key.
pub trait GeneratorOracle: Send + Sync {
    fn map_generator(&self, key: &str) -> Result<&dyn MapGenerator, OracleError>;
}
