use arena_core::{
    GeneratedMap, IdAllocator, Map, MapGenerator, MapOrigin, Point, TerrainType,
};
use rand::Rng;

use super::{MIN_SIDE, SpawnerPlan, place_spawners, seeded_rng};

/// Open rectangular room with the player in the top-left corner.
///
/// The seed only picks which wall tiles are drawn as decorations and where the
/// spawners go; the floor is always the full interior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxRoomGenerator {
    width: u32,
    height: u32,
    spawners: Vec<SpawnerPlan>,
}

impl BoxRoomGenerator {
    pub const KEY: &'static str = "box_room";

    /// One wall tile in this many is drawn as a decoration.
    const DECORATION_ODDS: u32 = 6;

    /// Sides shorter than five tiles are widened to five.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SIDE),
            height: height.max(MIN_SIDE),
            spawners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_spawner(mut self, plan: SpawnerPlan) -> Self {
        self.spawners.push(plan);
        self
    }

    fn terrain(&self, rng: &mut impl Rng, seed: u64) -> Map {
        let mut map = Map::box_room(self.width, self.height);
        let walls: Vec<Point> = map
            .points()
            .filter(|p| map.tile(*p).is_some_and(|t| t.terrain == TerrainType::Wall))
            .collect();
        for wall in walls {
            if rng.gen_ratio(1, Self::DECORATION_ODDS) {
                map.set(wall, TerrainType::Decoration);
            }
        }
        map.with_origin(MapOrigin::new(Self::KEY, seed))
    }
}

impl MapGenerator for BoxRoomGenerator {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn generate(&self, seed: u64, ids: &mut IdAllocator) -> GeneratedMap {
        let mut rng = seeded_rng(seed);
        let map = self.terrain(&mut rng, seed);
        let player_start = Point::new(1, 1);
        let scripts = place_spawners(&mut rng, &map, player_start, &self.spawners, ids);

        tracing::debug!(seed, spawners = scripts.len(), "box room generated");
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
