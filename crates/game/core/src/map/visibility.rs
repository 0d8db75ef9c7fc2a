//! Recursive shadow-casting field of view.
//!
//! The map is split into eight octants around the viewer. Each octant is
//! scanned row by row, tracking the slope interval still lit; opaque tiles
//! split the interval and the scan recurses into the lit remainder.

use crate::geometry::{Point, reach};

use super::Map;

/// Octant transforms: `(xx, xy, yx, yy)` columns.
const MULTIPLIERS: [[i32; 8]; 4] = [
    [1, 0, 0, -1, -1, 0, 0, 1],
    [0, 1, -1, 0, 0, -1, 1, 0],
    [0, 1, 1, 0, 0, -1, -1, 0],
    [1, 0, 0, 1, -1, 0, 0, -1],
];

/// Per-query visibility grid. Never stored in the game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapVisibility {
    width: u32,
    height: u32,
    visible: Vec<bool>,
}

impl MapVisibility {
    /// Computes what `origin` can see.
    ///
    /// `radius == 0` means unlimited. With `light_walls` opaque tiles bordering
    /// lit space are themselves marked visible.
    pub fn compute(map: &Map, origin: Point, radius: u32, light_walls: bool) -> Self {
        let mut visibility = Self {
            width: map.width(),
            height: map.height(),
            visible: vec![false; map.width() as usize * map.height() as usize],
        };

        if !map.is_on_map(origin) {
            return visibility;
        }
        visibility.mark(origin);

        let extent = reach(map.width().saturating_add(map.height()));
        let radius = if radius == 0 { extent } else { reach(radius).min(extent) };

        let mut caster = Caster {
            map,
            origin,
            radius,
            light_walls,
            visibility: &mut visibility,
        };
        for octant in 0..8 {
            caster.cast(
                1,
                1.0,
                0.0,
                [
                    MULTIPLIERS[0][octant],
                    MULTIPLIERS[1][octant],
                    MULTIPLIERS[2][octant],
                    MULTIPLIERS[3][octant],
                ],
            );
        }

        visibility
    }

    pub fn is_visible(&self, point: Point) -> bool {
        self.index(point).is_some_and(|index| self.visible[index])
    }

    pub fn visible_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.visible.iter().enumerate().filter_map(|(index, visible)| {
            visible.then(|| {
                Point::new(
                    (index % self.width as usize) as i32,
                    (index / self.width as usize) as i32,
                )
            })
        })
    }

    fn index(&self, point: Point) -> Option<usize> {
        (point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    fn mark(&mut self, point: Point) {
        if let Some(index) = self.index(point) {
            self.visible[index] = true;
        }
    }
}

struct Caster<'a> {
    map: &'a Map,
    origin: Point,
    radius: i32,
    light_walls: bool,
    visibility: &'a mut MapVisibility,
}

impl Caster<'_> {
    fn cast(&mut self, row: i32, start: f64, end: f64, [xx, xy, yx, yy]: [i32; 4]) {
        if start < end {
            return;
        }
        let radius_squared = self.radius * self.radius;
        let mut start = start;
        let mut new_start = 0.0;

        for j in row..=self.radius {
            let dy = -j;
            let mut blocked = false;

            for dx in -j..=0 {
                let point = Point::new(
                    self.origin.x + dx * xx + dy * xy,
                    self.origin.y + dx * yx + dy * yy,
                );
                let left_slope = (f64::from(dx) - 0.5) / (f64::from(dy) + 0.5);
                let right_slope = (f64::from(dx) + 0.5) / (f64::from(dy) - 0.5);

                if start < right_slope {
                    continue;
                }
                if end > left_slope {
                    break;
                }

                let opaque = !self.map.is_transparent(point);
                if dx * dx + dy * dy <= radius_squared && (self.light_walls || !opaque) {
                    self.visibility.mark(point);
                }

                if blocked {
                    if opaque {
                        new_start = right_slope;
                    } else {
                        blocked = false;
                        start = new_start;
                    }
                } else if opaque && j < self.radius {
                    blocked = true;
                    self.cast(j + 1, start, left_slope, [xx, xy, yx, yy]);
                    new_start = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_room_is_fully_visible() {
        let map = Map::box_room(7, 7);
        let fov = MapVisibility::compute(&map, Point::new(3, 3), 0, false);
        assert!(map.walkable_points().all(|p| fov.is_visible(p)));
        assert!(!fov.is_visible(Point::new(0, 0)));
    }

    #[test]
    fn light_walls_reveals_wall_ring() {
        let map = Map::box_room(7, 7);
        let fov = MapVisibility::compute(&map, Point::new(3, 3), 0, true);
        assert!(fov.is_visible(Point::new(0, 3)));
        assert!(fov.is_visible(Point::new(3, 6)));
    }

    #[test]
    fn pillar_casts_shadow() {
        let map = Map::from_rows(&[
            "#########",
            "#.......#",
            "#...#...#",
            "#.......#",
            "#########",
        ])
        .unwrap();
        let fov = MapVisibility::compute(&map, Point::new(2, 2), 0, false);
        assert!(fov.is_visible(Point::new(3, 2)));
        assert!(!fov.is_visible(Point::new(6, 2)));
        assert!(!fov.is_visible(Point::new(7, 2)));
        assert!(fov.is_visible(Point::new(6, 1)));
    }

    #[test]
    fn radius_limits_sight() {
        let map = Map::box_room(12, 3);
        let fov = MapVisibility::compute(&map, Point::new(1, 1), 3, false);
        assert!(fov.is_visible(Point::new(4, 1)));
        assert!(!fov.is_visible(Point::new(5, 1)));
    }

    #[test]
    fn origin_off_map_sees_nothing() {
        let map = Map::box_room(5, 5);
        let fov = MapVisibility::compute(&map, Point::new(-3, 1), 0, false);
        assert_eq!(fov.visible_points().count(), 0);
    }
}
