//! Deterministic rules for a turn-based tactical arena.
//!
//! `arena-core` defines the canonical rules (geometry, map, entities, combat,
//! skills, behaviors, scheduler) and exposes pure APIs that the runtime and
//! offline tools share. All state changes flow through [`engine::ArenaEngine`],
//! which never mutates the caller's [`GameState`] and returns new values.
pub mod action;
pub mod behavior;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod map;
pub mod pathfinding;
pub mod state;

pub use action::{
    Action, ActionTransition, ChargeError, MoveAction, MoveError, SkillError, UseSkillAction,
    WaitAction, WaitError,
};
pub use behavior::{ActorStep, Decision, PriorityChain, ScriptError};
pub use config::GameConfig;
pub use engine::{ArenaEngine, ExecuteError, TransitionPhase, TransitionPhaseError};
pub use env::{
    AnimationInfo, AnimationSink, ContentOracle, GameEnv, GeneratedMap, GeneratorOracle,
    MapGenerator, NoopAnimations, OracleError,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Direction, Point};
pub use map::{Map, MapOrigin, MapVisibility, TerrainType};
pub use pathfinding::DistanceField;
pub use state::{
    AreaDamageScript, Character, DamageFlags, DamageInfo, Defense, EntityId, GameState, Health,
    IdAllocator, MapScript, ReduceCooldownScript, Skill, SkillEffect, SkillResources,
    SpawnerScript, TargetInfo, TargettingStyle, TimedElement,
};
