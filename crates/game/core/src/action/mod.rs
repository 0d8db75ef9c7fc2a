//! Action domain: the commands a character can issue.
//!
//! # Module Structure
//!
//! - `transition`: the three-phase [`ActionTransition`] contract
//! - `charge`: CT spending shared by every action
//! - `movement` / `wait`: the physics primitives
//! - `skill`: skill invocation, backed by `targeting`, `effects` and `resources`
mod charge;
mod effects;
mod movement;
mod resources;
mod skill;
mod transition;
mod wait;

pub mod targeting;

pub use charge::ChargeError;
pub use movement::{MoveAction, MoveError, could_character_walk};
pub use skill::{SkillError, UseSkillAction};
pub use transition::ActionTransition;
pub use wait::{WaitAction, WaitError};

pub(crate) use charge::spend as spend_charge;

use crate::state::EntityId;

/// Closed set of character commands accepted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Wait(WaitAction),
    UseSkill(UseSkillAction),
}

impl Action {
    /// Returns the character performing this action.
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Move(action) => action.actor(),
            Action::Wait(action) => action.actor(),
            Action::UseSkill(action) => action.actor(),
        }
    }

    /// Returns the snake_case name of the action, used in logs.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Wait(_) => "wait",
            Action::UseSkill(_) => "use_skill",
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<WaitAction> for Action {
    fn from(action: WaitAction) -> Self {
        Self::Wait(action)
    }
}

impl From<UseSkillAction> for Action {
    fn from(action: UseSkillAction) -> Self {
        Self::UseSkill(action)
    }
}
