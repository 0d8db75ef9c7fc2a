use crate::action::{Action, WaitAction};
use crate::behavior::{ActorContext, script};
use crate::config::GameConfig;
use crate::state::{EntityId, GameState, TimedElement};

use super::ArenaEngine;
use super::errors::ExecuteError;
use super::transition::execute_transition;

/// Highest-CT element at or above the action threshold.
///
/// Ties go to the element listed first: player, enemies in order, scripts in order.
pub(crate) fn next_ready(state: &GameState) -> Option<(TimedElement, i32)> {
    state
        .timed_elements()
        .filter(|(_, ct)| *ct >= GameConfig::CT_NEEDED_FOR_ACTION)
        .fold(None, |best, (element, ct)| match best {
            Some((_, best_ct)) if best_ct >= ct => best,
            _ => Some((element, ct)),
        })
}

/// Smallest multiple of the tick size that brings `highest` up to the threshold.
pub(crate) fn ticks_until_ready(highest: i32) -> i32 {
    let missing = (GameConfig::CT_NEEDED_FOR_ACTION - highest).max(0);
    let tick = GameConfig::CT_PER_TICK;
    (missing + tick - 1) / tick * tick
}

/// Turn scheduling methods for ArenaEngine.
impl<'a> ArenaEngine<'a> {
    /// Grants turns until the player is the next to act. `state` is a private copy.
    pub(super) fn run_until_player_ready(&self, state: &mut GameState) -> Result<(), ExecuteError> {
        let max_steps = self.env.config().max_scheduler_steps;
        let mut steps = 0u32;

        loop {
            match next_ready(state) {
                Some((TimedElement::Player, ct)) => {
                    tracing::trace!(ct, round = state.round, "player ready");
                    return Ok(());
                }
                Some((element, _)) => {
                    if steps >= max_steps {
                        return Err(ExecuteError::SchedulerStalled { steps });
                    }
                    steps += 1;
                    self.dispatch(state, element)?;
                    if let Some(ct) = state.timed_element_ct(element) {
                        if ct >= GameConfig::CT_NEEDED_FOR_ACTION {
                            return Err(ExecuteError::TurnNotSpent { element, ct });
                        }
                    }
                }
                None => self.advance_time(state),
            }
        }
    }

    fn advance_time(&self, state: &mut GameState) {
        let highest = state
            .timed_elements()
            .map(|(_, ct)| ct)
            .max()
            .unwrap_or(GameConfig::CT_NEEDED_FOR_ACTION);
        let amount = ticks_until_ready(highest);
        state.advance_all(amount);
        state.round += 1;
        tracing::debug!(amount, round = state.round, "time advanced");
        self.env.animations().request_new_round(state, state.round);
    }

    fn dispatch(&self, state: &mut GameState, element: TimedElement) -> Result<(), ExecuteError> {
        match element {
            TimedElement::Player => Ok(()),
            TimedElement::Enemy(id) => self.run_actor(state, id),
            TimedElement::Script(id) => Ok(script::act(state, &self.env, id)?),
        }
    }

    /// Lets the chain pick an action for enemy `id` and executes it.
    pub(super) fn run_actor(&self, state: &mut GameState, id: EntityId) -> Result<(), ExecuteError> {
        let Some(actor) = state.character(id) else {
            return Ok(());
        };
        let (step, action) = {
            let ctx = ActorContext::new(state, &self.env, actor);
            self.chain
                .decide(&ctx)
                .unwrap_or(("wait", Action::Wait(WaitAction::new(id))))
        };
        tracing::debug!(
            actor = %id,
            step,
            action = action.as_snake_case(),
            "enemy acts"
        );
        execute_transition(&action, state, &self.env)
    }
}
