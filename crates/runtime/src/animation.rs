//! Animation sinks for headless sessions.

use std::sync::Mutex;

use arena_core::{AnimationInfo, AnimationSink, GameState};

/// One presentation request as seen by a sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    Animation(AnimationInfo),
    PlayerDead,
    NewRound(u32),
    NewGame,
}

/// Keeps every request in order. Shells drain it after each command.
#[derive(Debug, Default)]
pub struct RecordingAnimations {
    events: Mutex<Vec<AnimationEvent>>,
}

impl RecordingAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: AnimationEvent) {
        // A poisoned recorder only loses presentation data.
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Copies the recorded events without clearing them.
    pub fn events(&self) -> Vec<AnimationEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<AnimationEvent> {
        self.events
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }
}

impl AnimationSink for RecordingAnimations {
    fn request_animation(&self, _state: &GameState, animation: &AnimationInfo) {
        self.push(AnimationEvent::Animation(animation.clone()));
    }

    fn request_player_dead(&self, _state: &GameState) {
        self.push(AnimationEvent::PlayerDead);
    }

    fn request_new_round(&self, _state: &GameState, round: u32) {
        self.push(AnimationEvent::NewRound(round));
    }

    fn request_new_game(&self) {
        self.push(AnimationEvent::NewGame);
    }
}

/// Reports every request as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAnimations;

impl AnimationSink for TracingAnimations {
    fn request_animation(&self, state: &GameState, animation: &AnimationInfo) {
        tracing::trace!(round = state.round, kind = animation.kind_name(), ?animation, "animation");
    }

    fn request_player_dead(&self, state: &GameState) {
        tracing::info!(round = state.round, player = %state.player.name, "player died");
    }

    fn request_new_round(&self, _state: &GameState, round: u32) {
        tracing::trace!(round, "new round");
    }

    fn request_new_game(&self) {
        tracing::info!("new game");
    }
}
