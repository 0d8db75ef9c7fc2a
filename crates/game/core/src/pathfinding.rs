//! Shortest-path distance field used by the AI to approach or kite the player.

use ::pathfinding::prelude::dijkstra_all;

use crate::geometry::{Direction, Point};
use crate::map::Map;

/// Hop distance from every walkable tile to a target point.
///
/// Steps are eight-way with unit cost. Characters are ignored; only terrain
/// blocks the flood. Unreachable or off-map tiles report `-1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    target: Point,
    distances: Vec<i32>,
}

impl DistanceField {
    pub const UNREACHABLE: i32 = -1;

    pub fn compute(map: &Map, target: Point) -> Self {
        let mut distances = vec![Self::UNREACHABLE; map.width() as usize * map.height() as usize];
        let index = |p: Point| p.y as usize * map.width() as usize + p.x as usize;

        if map.is_on_map(target) {
            distances[index(target)] = 0;
            let reached = dijkstra_all(&target, |p: &Point| {
                let p = *p;
                Direction::ALL
                    .into_iter()
                    .map(move |d| p.step(d))
                    .filter(|n| map.is_walkable(*n))
                    .map(|n| (n, 1))
                    .collect::<Vec<_>>()
            });
            for (point, (_, cost)) in reached {
                if point != target {
                    distances[index(point)] = cost;
                }
            }
        }

        Self {
            width: map.width(),
            height: map.height(),
            target,
            distances,
        }
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn distance(&self, point: Point) -> i32 {
        if point.x < 0
            || point.y < 0
            || point.x as u32 >= self.width
            || point.y as u32 >= self.height
        {
            return Self::UNREACHABLE;
        }
        self.distances[point.y as usize * self.width as usize + point.x as usize]
    }

    pub fn is_reachable(&self, point: Point) -> bool {
        self.distance(point) != Self::UNREACHABLE
    }

    /// Directions from `from` leading to a strictly lower distance, in [`Direction::ALL`] order.
    pub fn next_steps(&self, from: Point) -> Vec<Direction> {
        let current = self.distance(from);
        if current <= 0 {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|d| {
                let next = self.distance(from.step(*d));
                next != Self::UNREACHABLE && next < current
            })
            .collect()
    }
}
