//! Terrain grid and line-of-sight.
mod grid;
mod tile;
mod visibility;

pub use grid::{Map, MapOrigin, MapParseError};
pub use tile::{MapTile, TerrainType};
pub use visibility::MapVisibility;
