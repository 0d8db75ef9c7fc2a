use arena_core::{
    GeneratedMap, IdAllocator, Map, MapGenerator, MapOrigin, Point, TerrainType,
};
use rand::Rng;

use super::{MIN_SIDE, SpawnerPlan, place_spawners, seeded_rng};

/// Hall with scattered pillars that break line of sight.
///
/// Pillars only stand on tiles whose coordinates are both even, so each one is
/// ringed by floor and the hall stays connected whatever the seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PillarHallGenerator {
    width: u32,
    height: u32,
    pillar_percent: u32,
    spawners: Vec<SpawnerPlan>,
}

impl PillarHallGenerator {
    pub const KEY: &'static str = "pillar_hall";
    pub const DEFAULT_PILLAR_PERCENT: u32 = 40;

    /// Sides shorter than five tiles are widened to five.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SIDE),
            height: height.max(MIN_SIDE),
            pillar_percent: Self::DEFAULT_PILLAR_PERCENT,
            spawners: Vec::new(),
        }
    }

    /// Chance for each candidate tile to hold a pillar, capped at 100.
    #[must_use]
    pub fn with_pillar_percent(mut self, percent: u32) -> Self {
        self.pillar_percent = percent.min(100);
        self
    }

    #[must_use]
    pub fn with_spawner(mut self, plan: SpawnerPlan) -> Self {
        self.spawners.push(plan);
        self
    }

    fn terrain(&self, rng: &mut impl Rng, seed: u64) -> Map {
        let mut map = Map::box_room(self.width, self.height);
        let (right, bottom) = (self.width as i32 - 2, self.height as i32 - 2);

        for y in (2..=bottom).step_by(2) {
            for x in (2..=right).step_by(2) {
                if !rng.gen_ratio(self.pillar_percent, 100) {
                    continue;
                }
                let pillar = if rng.gen_bool(0.25) {
                    TerrainType::DecorationSpecial
                } else {
                    TerrainType::Wall
                };
                map.set(Point::new(x, y), pillar);
            }
        }
        map.with_origin(MapOrigin::new(Self::KEY, seed))
    }
}

impl MapGenerator for PillarHallGenerator {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn generate(&self, seed: u64, ids: &mut IdAllocator) -> GeneratedMap {
        let mut rng = seeded_rng(seed);
        let map = self.terrain(&mut rng, seed);
        let player_start = Point::new(1, 1);
        let scripts = place_spawners(&mut rng, &map, player_start, &self.spawners, ids);

        tracing::debug!(seed, spawners = scripts.len(), "pillar hall generated");
        GeneratedMap {
            map,
            scripts,
            player_start,
        }
    }

    fn regenerate(&self, seed: u64) -> Map {
        self.terrain(&mut seeded_rng(seed), seed)
    }
}
