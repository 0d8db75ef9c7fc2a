//! Timed map entities that compete for turns alongside characters.

use crate::geometry::Point;

use super::EntityId;

/// Periodically creates characters from a content template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnerScript {
    pub id: EntityId,
    pub ct: i32,
    pub position: Point,
    /// Content template name of the spawned character.
    pub spawn_name: String,
    /// Activations to skip between spawns.
    pub spawn_cooldown: u32,
    pub total_to_spawn: u32,
    pub spawned: u32,
    pub countdown: u32,
}

impl SpawnerScript {
    /// New spawner whose first spawn happens after one full cooldown.
    pub fn new(
        id: EntityId,
        position: Point,
        spawn_name: impl Into<String>,
        spawn_cooldown: u32,
        total_to_spawn: u32,
    ) -> Self {
        Self {
            id,
            ct: 0,
            position,
            spawn_name: spawn_name.into(),
            spawn_cooldown,
            total_to_spawn,
            spawned: 0,
            countdown: spawn_cooldown,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.total_to_spawn
    }
}

/// Ticks one skill's cooldown down, one step per turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReduceCooldownScript {
    pub id: EntityId,
    pub ct: i32,
    pub character: EntityId,
    pub skill: EntityId,
}

/// Delayed blast over a fixed set of points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaDamageScript {
    pub id: EntityId,
    pub ct: i32,
    pub area: Vec<Point>,
    pub damage: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapScript {
    Spawner(SpawnerScript),
    ReduceCooldown(ReduceCooldownScript),
    AreaDamage(AreaDamageScript),
}

impl MapScript {
    pub fn id(&self) -> EntityId {
        match self {
            MapScript::Spawner(s) => s.id,
            MapScript::ReduceCooldown(s) => s.id,
            MapScript::AreaDamage(s) => s.id,
        }
    }

    pub fn ct(&self) -> i32 {
        match self {
            MapScript::Spawner(s) => s.ct,
            MapScript::ReduceCooldown(s) => s.ct,
            MapScript::AreaDamage(s) => s.ct,
        }
    }

    pub(crate) fn ct_mut(&mut self) -> &mut i32 {
        match self {
            MapScript::Spawner(s) => &mut s.ct,
            MapScript::ReduceCooldown(s) => &mut s.ct,
            MapScript::AreaDamage(s) => &mut s.ct,
        }
    }

    #[must_use]
    pub fn with_ct(mut self, ct: i32) -> Self {
        *self.ct_mut() = ct;
        self
    }

    #[must_use]
    pub fn with_added_ct(mut self, amount: i32) -> Self {
        *self.ct_mut() += amount;
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            MapScript::Spawner(_) => "spawner",
            MapScript::ReduceCooldown(_) => "reduce_cooldown",
            MapScript::AreaDamage(_) => "area_damage",
        }
    }
}

impl From<SpawnerScript> for MapScript {
    fn from(script: SpawnerScript) -> Self {
        MapScript::Spawner(script)
    }
}

impl From<ReduceCooldownScript> for MapScript {
    fn from(script: ReduceCooldownScript) -> Self {
        MapScript::ReduceCooldown(script)
    }
}

impl From<AreaDamageScript> for MapScript {
    fn from(script: AreaDamageScript) -> Self {
        MapScript::AreaDamage(script)
    }
}
