//! Turn behaviors for everything the scheduler can hand a turn to.
//!
//! Enemies run a [`PriorityChain`] of [`ActorStep`]s: each step inspects the
//! state and either proposes an [`Action`] or passes. The first proposal wins;
//! the engine executes it through the regular transition pipeline. Scripts are
//! plain state machines in [`script`].

mod actor;
pub mod script;

pub use actor::{
    DelayedAttack, DirectAttack, MoveAndAttack, MovementSkill, SelfHeal, WalkTowardPlayer,
    WaitFallback, default_chain,
};
pub use script::ScriptError;

use crate::action::Action;
use crate::env::GameEnv;
use crate::pathfinding::DistanceField;
use crate::state::{Character, GameState, Skill};

/// Outcome of a single step of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Act(Action),
    NoAction,
}

impl From<Option<Action>> for Decision {
    fn from(action: Option<Action>) -> Self {
        action.map_or(Decision::NoAction, Decision::Act)
    }
}

/// Whether an actor closes in or keeps its distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CombatProfile {
    Melee,
    Ranged,
}

/// Read-only view shared by every step while an actor decides.
pub struct ActorContext<'a> {
    pub state: &'a GameState,
    pub env: &'a GameEnv<'a>,
    pub actor: &'a Character,
    /// Shortest-path distances to the player.
    pub distances: DistanceField,
}

impl<'a> ActorContext<'a> {
    pub fn new(state: &'a GameState, env: &'a GameEnv<'a>, actor: &'a Character) -> Self {
        Self {
            state,
            env,
            actor,
            distances: DistanceField::compute(state.map(), state.player.position),
        }
    }

    /// Melee when the strongest skill reaches no further than an adjacent tile.
    pub fn profile(&self) -> CombatProfile {
        let reach = best_by_power(self.actor.skills.iter()).map_or(1, Skill::attack_range);
        if reach <= 1 {
            CombatProfile::Melee
        } else {
            CombatProfile::Ranged
        }
    }

    /// Ready skills in list order.
    pub fn ready_skills(&self) -> impl Iterator<Item = &'a Skill> + 'a {
        let actor = self.actor;
        actor.skills.iter().filter(|s| s.ready_for_use())
    }
}

/// Highest power wins; ties go to the later skill.
pub fn best_by_power<'s>(skills: impl Iterator<Item = &'s Skill>) -> Option<&'s Skill> {
    skills.max_by_key(|s| s.power())
}

/// One link of the enemy decision chain.
pub trait ActorStep: Send + Sync {
    fn name(&self) -> &'static str;

    fn decide(&self, ctx: &ActorContext<'_>) -> Decision;
}

/// Short-circuiting chain of steps, tried in order.
pub struct PriorityChain {
    steps: Vec<Box<dyn ActorStep>>,
}

impl PriorityChain {
    pub fn new(steps: Vec<Box<dyn ActorStep>>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the first proposed action and the name of the step that made it.
    pub fn decide(&self, ctx: &ActorContext<'_>) -> Option<(&'static str, Action)> {
        self.steps.iter().find_map(|step| match step.decide(ctx) {
            Decision::Act(action) => Some((step.name(), action)),
            Decision::NoAction => None,
        })
    }
}

impl Default for PriorityChain {
    fn default() -> Self {
        default_chain()
    }
}
