/// Canonical terrain classes for map tiles.
///
/// Decorations are purely visual variants of wall: they block movement and sight.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainType {
    #[default]
    Wall,
    Floor,
    Decoration,
    DecorationSpecial,
}

impl TerrainType {
    pub const fn is_walkable(self) -> bool {
        matches!(self, TerrainType::Floor)
    }

    pub const fn is_transparent(self) -> bool {
        matches!(self, TerrainType::Floor)
    }

    /// Glyph used by the ASCII map format.
    pub const fn glyph(self) -> char {
        match self {
            TerrainType::Wall => '#',
            TerrainType::Floor => '.',
            TerrainType::Decoration => '*',
            TerrainType::DecorationSpecial => '&',
        }
    }

    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(TerrainType::Wall),
            '.' => Some(TerrainType::Floor),
            '*' => Some(TerrainType::Decoration),
            '&' => Some(TerrainType::DecorationSpecial),
            _ => None,
        }
    }
}

/// Single map cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapTile {
    pub terrain: TerrainType,
}

impl MapTile {
    pub const fn new(terrain: TerrainType) -> Self {
        Self { terrain }
    }

    pub const fn is_walkable(self) -> bool {
        self.terrain.is_walkable()
    }

    pub const fn is_transparent(self) -> bool {
        self.terrain.is_transparent()
    }
}
