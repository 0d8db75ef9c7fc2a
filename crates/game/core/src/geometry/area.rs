//! Point-set shapes used by area skills.
//!
//! Shapes are pure geometry. Occlusion against the map is applied by the
//! skills engine afterwards.

use super::{Direction, Point};

/// Converts a tile count to a signed offset, saturating at `i32::MAX`.
pub fn reach(tiles: u32) -> i32 {
    i32::try_from(tiles).unwrap_or(i32::MAX)
}

/// All points within Manhattan distance `radius` of `center`, row-major order.
pub fn burst(center: Point, radius: u32) -> Vec<Point> {
    let r = reach(radius);
    let mut points = Vec::new();
    for dy in -r..=r {
        let span = r - dy.abs();
        for dx in -span..=span {
            points.push(Point::new(center.x + dx, center.y + dy));
        }
    }
    points
}

/// Triangular cone extending `range` tiles from `origin`.
///
/// Row `i` (1-based) lies `i` tiles out along `direction` and spans `i - 1`
/// tiles to each side. Only cardinal directions describe a cone; diagonals
/// yield an empty set.
pub fn cone(origin: Point, direction: Direction, range: u32) -> Vec<Point> {
    if !direction.is_cardinal() {
        return Vec::new();
    }
    let (left, right) = direction.perpendicular();
    let mut points = Vec::new();
    for i in 1..=reach(range) {
        let center = origin + direction.delta() * i;
        for offset in (1..i).rev() {
            points.push(center + left * offset);
        }
        points.push(center);
        for offset in 1..i {
            points.push(center + right * offset);
        }
    }
    points
}

/// Straight run of `range` points from `origin` (exclusive) in `direction`.
pub fn ray(origin: Point, direction: Direction, range: u32) -> Vec<Point> {
    (1..=reach(range))
        .map(|i| origin + direction.delta() * i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_counts_diamond() {
        assert_eq!(burst(Point::new(5, 5), 0), vec![Point::new(5, 5)]);
        assert_eq!(burst(Point::new(5, 5), 1).len(), 5);
        assert_eq!(burst(Point::new(5, 5), 3).len(), 25);
        assert!(burst(Point::new(5, 5), 3)
            .iter()
            .all(|p| p.lattice_distance(Point::new(5, 5)) <= 3));
    }

    #[test]
    fn cone_widens_each_row() {
        let points = cone(Point::new(5, 5), Direction::North, 3);
        assert_eq!(points.len(), 1 + 3 + 5);
        assert!(points.contains(&Point::new(5, 4)));
        assert!(points.contains(&Point::new(3, 2)));
        assert!(points.contains(&Point::new(7, 2)));
        assert!(!points.contains(&Point::new(5, 5)));
    }

    #[test]
    fn diagonal_cone_is_empty() {
        assert!(cone(Point::new(0, 0), Direction::SouthEast, 3).is_empty());
    }

    #[test]
    fn reach_saturates() {
        assert_eq!(reach(7), 7);
        assert_eq!(reach(u32::MAX), i32::MAX);
    }

    #[test]
    fn ray_runs_to_range() {
        let points = ray(Point::new(0, 0), Direction::SouthWest, 2);
        assert_eq!(points, vec![Point::new(-1, 1), Point::new(-2, 2)]);
    }
}
