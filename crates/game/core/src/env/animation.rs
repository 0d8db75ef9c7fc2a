use crate::geometry::{Direction, Point};
use crate::state::{EntityId, GameState};

/// Presentation hint emitted while rules resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationInfo {
    /// A character slid along `path` (destination last).
    Movement { character: EntityId, path: Vec<Point> },
    /// Something flew along `path` to its impact point.
    Projectile { path: Vec<Point> },
    /// Burst centered on `center`.
    Explosion { center: Point, radius: u32 },
    /// Cone sweep from `origin`.
    Cone {
        origin: Point,
        direction: Direction,
        points: Vec<Point>,
    },
    /// Flash over an explicit point set (lines and delayed blasts).
    SpecificAreaExplosion { points: Vec<Point> },
}

impl AnimationInfo {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnimationInfo::Movement { .. } => "movement",
            AnimationInfo::Projectile { .. } => "projectile",
            AnimationInfo::Explosion { .. } => "explosion",
            AnimationInfo::Cone { .. } => "cone",
            AnimationInfo::SpecificAreaExplosion { .. } => "specific_area_explosion",
        }
    }
}

/// Fire-and-forget presentation callbacks.
///
/// Implementations must not feed anything back into the rules; the engine
/// produces the same states whether or not anyone is listening.
pub trait AnimationSink: Send + Sync {
    fn request_animation(&self, state: &GameState, animation: &AnimationInfo);

    /// Called once when a hit drops the player to zero health or below.
    fn request_player_dead(&self, state: &GameState);

    /// Called each time the scheduler advances time.
    fn request_new_round(&self, _state: &GameState, _round: u32) {}

    fn request_new_game(&self) {}
}

/// Sink that discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAnimations;

impl AnimationSink for NoopAnimations {
    fn request_animation(&self, _state: &GameState, _animation: &AnimationInfo) {}

    fn request_player_dead(&self, _state: &GameState) {}
}
