use crate::geometry::{Point, trace_line};

use super::{MapTile, TerrainType};

/// Identifies how a map was produced so it can be regenerated instead of stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapOrigin {
    pub generator: String,
    pub seed: u64,
}

impl MapOrigin {
    pub fn new(generator: impl Into<String>, seed: u64) -> Self {
        Self {
            generator: generator.into(),
            seed,
        }
    }
}

/// Errors raised while parsing an ASCII map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapParseError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown terrain glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
}

/// Fixed-size terrain grid.
///
/// The layout only changes through [`Map::set`]; gameplay never edits terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    width: u32,
    height: u32,
    tiles: Vec<MapTile>,
    origin: Option<MapOrigin>,
}

impl Map {
    /// Creates a map filled with a single terrain type.
    pub fn filled(width: u32, height: u32, terrain: TerrainType) -> Self {
        Self {
            width,
            height,
            tiles: vec![MapTile::new(terrain); (width as usize) * (height as usize)],
            origin: None,
        }
    }

    /// Creates a rectangular room: floor surrounded by a one-tile wall ring.
    pub fn box_room(width: u32, height: u32) -> Self {
        let mut map = Self::filled(width, height, TerrainType::Wall);
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                map.set(Point::new(x as i32, y as i32), TerrainType::Floor);
            }
        }
        map
    }

    /// Parses rows of terrain glyphs (`#` wall, `.` floor, `*` decoration, `&` special).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapParseError> {
        let first = rows.first().ok_or(MapParseError::Empty)?;
        let expected = first.as_ref().chars().count();
        let mut tiles = Vec::with_capacity(expected * rows.len());

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != expected {
                return Err(MapParseError::RaggedRow {
                    row: y,
                    expected,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = TerrainType::from_glyph(glyph)
                    .ok_or(MapParseError::UnknownGlyph { glyph, x, y })?;
                tiles.push(MapTile::new(terrain));
            }
        }

        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            tiles,
            origin: None,
        })
    }

    #[must_use]
    pub fn with_origin(mut self, origin: MapOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn origin(&self) -> Option<&MapOrigin> {
        self.origin.as_ref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_on_map(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    fn index(&self, point: Point) -> Option<usize> {
        self.is_on_map(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    pub fn tile(&self, point: Point) -> Option<MapTile> {
        self.index(point).map(|index| self.tiles[index])
    }

    /// Replaces the terrain at `point`. Off-map points are ignored.
    pub fn set(&mut self, point: Point, terrain: TerrainType) {
        if let Some(index) = self.index(point) {
            self.tiles[index] = MapTile::new(terrain);
        }
    }

    pub fn is_walkable(&self, point: Point) -> bool {
        self.tile(point).is_some_and(MapTile::is_walkable)
    }

    pub fn is_transparent(&self, point: Point) -> bool {
        self.tile(point).is_some_and(MapTile::is_transparent)
    }

    /// Every on-map point, row-major.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Point::new(x, y)))
    }

    pub fn walkable_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|p| self.is_walkable(*p))
    }

    /// True when no point strictly between `from` and `to` blocks sight.
    pub fn is_path_clear(&self, from: Point, to: Point) -> bool {
        trace_line(from, to)
            .take_while(|p| *p != to)
            .all(|p| self.is_transparent(p))
    }

    /// True when every traced point from `from` to `to`, destination included, is transparent.
    pub fn is_reachable_from(&self, from: Point, to: Point) -> bool {
        self.is_transparent(to) && trace_line(from, to).all(|p| self.is_transparent(p))
    }

    /// Renders the terrain back into glyph rows.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as i32)
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| {
                        self.tile(Point::new(x, y))
                            .map_or(' ', |tile| tile.terrain.glyph())
                    })
                    .collect()
            })
            .collect()
    }
}
