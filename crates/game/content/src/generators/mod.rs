//! Seeded map generators and the registry the runtime looks them up in.
//!
//! Every generator draws its terrain from a `ChaCha8Rng` seeded with the match
//! seed before drawing anything else, so [`MapGenerator::regenerate`] rebuilds
//! the exact terrain of [`MapGenerator::generate`] without the scripts.

mod box_room;
mod pillars;

pub use box_room::BoxRoomGenerator;
pub use pillars::PillarHallGenerator;

use std::fmt;

use arena_core::{
    GeneratorOracle, IdAllocator, Map, MapGenerator, MapScript, OracleError, Point, SpawnerScript,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Smallest side length that still leaves a 3x3 floor inside the wall ring.
pub(crate) const MIN_SIDE: u32 = 5;

pub(crate) fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Spawner a generator plants when a match starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnerPlan {
    pub spawn_name: String,
    pub spawn_cooldown: u32,
    pub total_to_spawn: u32,
}

impl SpawnerPlan {
    pub fn new(spawn_name: impl Into<String>, spawn_cooldown: u32, total_to_spawn: u32) -> Self {
        Self {
            spawn_name: spawn_name.into(),
            spawn_cooldown,
            total_to_spawn,
        }
    }
}

/// Places one spawner per plan on distinct floor tiles away from the player.
///
/// Candidates are the walkable tiles at least half the map's longer side from
/// `player_start`; plans beyond the number of candidates are dropped.
pub(crate) fn place_spawners(
    rng: &mut impl Rng,
    map: &Map,
    player_start: Point,
    plans: &[SpawnerPlan],
    ids: &mut IdAllocator,
) -> Vec<MapScript> {
    let min_distance = map.width().max(map.height()) / 2;
    let candidates: Vec<Point> = map
        .walkable_points()
        .filter(|p| p.lattice_distance(player_start) >= min_distance)
        .collect();

    candidates
        .choose_multiple(rng, plans.len())
        .zip(plans)
        .map(|(position, plan)| {
            MapScript::from(SpawnerScript::new(
                ids.allocate(),
                *position,
                plan.spawn_name.clone(),
                plan.spawn_cooldown,
                plan.total_to_spawn,
            ))
        })
        .collect()
}

/// Map generators keyed by [`MapGenerator::key`].
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn MapGenerator>>,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// The generators shipped with the built-in content.
    pub fn standard() -> Self {
        Self::new()
            .with_generator(BoxRoomGenerator::new(9, 9).with_spawner(SpawnerPlan::new("Rat", 2, 3)))
            .with_generator(
                PillarHallGenerator::new(15, 11)
                    .with_spawner(SpawnerPlan::new("Goblin", 3, 2))
                    .with_spawner(SpawnerPlan::new("Archer", 4, 2))
                    .with_spawner(SpawnerPlan::new("Shaman", 6, 1)),
            )
    }

    /// Adds `generator`, replacing any generator registered under the same key.
    #[must_use]
    pub fn with_generator(mut self, generator: impl MapGenerator + 'static) -> Self {
        self.generators.retain(|g| g.key() != generator.key());
        self.generators.push(Box::new(generator));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.generators.iter().map(|g| g.key())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl GeneratorOracle for GeneratorRegistry {
    fn map_generator(&self, key: &str) -> Result<&dyn MapGenerator, OracleError> {
        self.generators
            .iter()
            .find(|g| g.key() == key)
            .map(|g| g.as_ref())
            .ok_or_else(|| OracleError::GeneratorNotFound(key.to_owned()))
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}
