//! Turn scheduling and action execution pipeline.
//!
//! The [`ArenaEngine`] is the authoritative reducer for [`GameState`]. Every
//! operation clones the caller's state, mutates the private copy through the
//! transition phases and hands back the result. A failure anywhere discards
//! the copy, so commands are all-or-nothing.

mod errors;
mod scheduler;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, targeting};
use crate::behavior::{PriorityChain, script};
use crate::env::GameEnv;
use crate::geometry::Point;
use crate::map::MapVisibility;
use crate::state::{EntityId, GameState};

/// Rules engine bound to one environment.
pub struct ArenaEngine<'a> {
    env: GameEnv<'a>,
    chain: PriorityChain,
}

impl<'a> ArenaEngine<'a> {
    /// Creates an engine with the standard enemy decision chain.
    pub fn new(env: GameEnv<'a>) -> Self {
        Self {
            env,
            chain: PriorityChain::default(),
        }
    }

    /// Replaces the enemy decision chain.
    #[must_use]
    pub fn with_chain(mut self, chain: PriorityChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn env(&self) -> &GameEnv<'a> {
        &self.env
    }

    // ===== commands =====

    /// Runs one action through the three-phase pipeline.
    pub fn execute(&self, state: &GameState, action: &Action) -> Result<GameState, ExecuteError> {
        let mut next = state.clone();
        transition::execute_transition(action, &mut next, &self.env)?;
        Ok(next)
    }

    /// Grants turns to enemies and scripts until the player is next.
    pub fn process_until_player_ready(&self, state: &GameState) -> Result<GameState, ExecuteError> {
        let mut next = state.clone();
        self.run_until_player_ready(&mut next)?;
        Ok(next)
    }

    /// Executes a player command, then runs the world until the player is ready again.
    pub fn act_player(&self, state: &GameState, action: &Action) -> Result<GameState, ExecuteError> {
        let actor = action.actor();
        if actor != state.player.id {
            return Err(ExecuteError::NotPlayerAction {
                actor,
                player: state.player.id,
            });
        }

        let mut next = state.clone();
        transition::execute_transition(action, &mut next, &self.env)?;
        tracing::debug!(action = action.as_snake_case(), ct = next.player.ct, "player acted");
        self.run_until_player_ready(&mut next)?;
        Ok(next)
    }

    /// Gives enemy `id` one turn regardless of its CT.
    pub fn take_actor_turn(&self, state: &GameState, id: EntityId) -> Result<GameState, ExecuteError> {
        let mut next = state.clone();
        self.run_actor(&mut next, id)?;
        Ok(next)
    }

    /// Gives script `id` one turn regardless of its CT.
    pub fn take_script_turn(&self, state: &GameState, id: EntityId) -> Result<GameState, ExecuteError> {
        let mut next = state.clone();
        script::act(&mut next, &self.env, id)?;
        Ok(next)
    }

    // ===== queries =====

    pub fn could_character_walk(&self, state: &GameState, target: Point) -> bool {
        crate::action::could_character_walk(state, target)
    }

    pub fn visibility_for(&self, state: &GameState, character: EntityId) -> Option<MapVisibility> {
        let character = state.character(character)?;
        Some(targeting::visibility_for(state, &self.env, character))
    }

    /// False when the character or skill does not exist.
    pub fn is_valid_target_for_skill(
        &self,
        state: &GameState,
        invoker: EntityId,
        skill: EntityId,
        target: Point,
    ) -> bool {
        let Some(character) = state.character(invoker) else {
            return false;
        };
        character
            .skill(skill)
            .is_some_and(|s| targeting::is_valid_target(state, &self.env, character, s, target))
    }

    pub fn points_skill_can_target(&self, state: &GameState, invoker: EntityId, skill: EntityId) -> Vec<Point> {
        let Some(character) = state.character(invoker) else {
            return Vec::new();
        };
        character
            .skill(skill)
            .map(|s| targeting::points_skill_can_target(state, &self.env, character, s))
            .unwrap_or_default()
    }

    pub fn affected_points_for_skill(
        &self,
        state: &GameState,
        invoker: EntityId,
        skill: EntityId,
        target: Point,
    ) -> Vec<Point> {
        let Some(character) = state.character(invoker) else {
            return Vec::new();
        };
        character
            .skill(skill)
            .map(|s| targeting::affected_points(state, character, s, target))
            .unwrap_or_default()
    }
}
