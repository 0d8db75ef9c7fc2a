use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Integer grid coordinate. `y` grows downward, matching row order on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring point one step in `direction`.
    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        self + direction.delta()
    }

    /// Manhattan distance, used for bursts and cone adjacency.
    #[inline]
    pub fn lattice_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Squared Euclidean distance. Range checks compare against `range * range`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> u64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        (dx * dx + dy * dy) as u64
    }

    /// Euclidean ("grid") distance check: `distance(self, other) <= range`.
    #[inline]
    pub fn within_range(self, other: Self, range: u32) -> bool {
        self.distance_squared(other) <= u64::from(range) * u64::from(range)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;
    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight grid directions.
///
/// [`Direction::ALL`] is the fixed enumeration order used wherever a
/// deterministic choice between directions is needed (pathfinding ties).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::NorthEast => Point::new(1, -1),
            Direction::East => Point::new(1, 0),
            Direction::SouthEast => Point::new(1, 1),
            Direction::South => Point::new(0, 1),
            Direction::SouthWest => Point::new(-1, 1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, -1),
        }
    }

    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    /// Coarse direction from `from` toward `to` (sign of each axis).
    ///
    /// Returns `None` when both points coincide.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        Self::from_delta(to - from)
    }

    pub fn from_delta(delta: Point) -> Option<Direction> {
        match (delta.x.signum(), delta.y.signum()) {
            (0, -1) => Some(Direction::North),
            (1, -1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (0, 1) => Some(Direction::South),
            (-1, 1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// The two directions perpendicular to a cardinal direction.
    pub const fn perpendicular(self) -> (Point, Point) {
        let d = self.delta();
        (Point::new(-d.y, d.x), Point::new(d.y, -d.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_between_uses_axis_signs() {
        let origin = Point::new(2, 2);
        assert_eq!(Direction::between(origin, Point::new(2, 0)), Some(Direction::North));
        assert_eq!(Direction::between(origin, Point::new(7, 3)), Some(Direction::SouthEast));
        assert_eq!(Direction::between(origin, Point::new(0, 2)), Some(Direction::West));
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn every_direction_round_trips_through_its_delta() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_delta(direction.delta()), Some(direction));
        }
    }

    #[test]
    fn range_is_euclidean() {
        let origin = Point::new(0, 0);
        assert!(origin.within_range(Point::new(3, 4), 5));
        assert!(!origin.within_range(Point::new(4, 4), 5));
        assert!(origin.within_range(Point::new(5, 0), 5));
        assert!(!origin.within_range(Point::new(6, 0), 5));
    }

    #[test]
    fn lattice_distance_is_manhattan() {
        assert_eq!(Point::new(1, 1).lattice_distance(Point::new(3, 4)), 5);
        assert_eq!(Point::new(-1, 0).lattice_distance(Point::new(1, 0)), 2);
    }

    #[test]
    fn directions_parse_from_snake_case() {
        assert_eq!("north_east".parse::<Direction>().ok(), Some(Direction::NorthEast));
        assert_eq!(Direction::SouthWest.to_string(), "south_west");
    }
}
