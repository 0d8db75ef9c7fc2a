//! Data-driven content for the arena.
//!
//! This crate houses the template library and the map generators the engine
//! consults through its oracles:
//! - Character and skill templates (data-driven via RON)
//! - Seeded map generators and the registry that looks them up by key
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed through `arena-core`'s oracle traits and never appears
//! in game state except through the entities it creates.

pub mod error;
pub mod generators;
pub mod library;
pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use error::ContentError;
pub use generators::{BoxRoomGenerator, GeneratorRegistry, PillarHallGenerator, SpawnerPlan};
pub use library::{ContentLibrary, MAX_SKILL_REACH};
pub use templates::{CharacterTemplate, SkillTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
