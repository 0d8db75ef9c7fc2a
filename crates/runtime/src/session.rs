//! Session driver owned by a presentation shell.
//!
//! A [`Session`] holds the current [`GameState`] and the collaborators the
//! engine needs. Every command goes through [`ArenaEngine`], so a failed
//! command leaves the session exactly as it was.

use std::sync::Arc;

use arena_content::GeneratorRegistry;
use arena_core::{
    Action, AnimationSink, ArenaEngine, ContentOracle, Direction, EntityId, GameConfig, GameEnv,
    GameState, GeneratorOracle, IdAllocator, MoveAction, NoopAnimations, Point, UseSkillAction,
    WaitAction,
};

use crate::error::{Result, RuntimeError};
use crate::save::SaveGame;
use crate::storage::{InMemoryStorage, SaveStorage};

/// Template the player is created from unless configured otherwise.
pub const DEFAULT_PLAYER_TEMPLATE: &str = "Hero";

pub struct Session {
    config: GameConfig,
    content: Arc<dyn ContentOracle>,
    generators: Arc<dyn GeneratorOracle>,
    animations: Arc<dyn AnimationSink>,
    storage: Box<dyn SaveStorage>,
    player_template: String,
    state: Option<GameState>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Engine bound to this session's collaborators.
    pub fn engine(&self) -> ArenaEngine<'_> {
        let env = GameEnv::new(&self.config)
            .with_animations(self.animations.as_ref())
            .with_content(self.content.as_ref());
        ArenaEngine::new(env)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    fn active_state(&self) -> Result<&GameState> {
        self.state.as_ref().ok_or(RuntimeError::NoActiveGame)
    }

    pub fn is_player_dead(&self) -> bool {
        self.state.as_ref().is_some_and(|s| !s.player.is_alive())
    }

    // ===== match lifecycle =====

    /// Starts a match on a freshly generated map and runs the world until the player may act.
    pub fn new_game(&mut self, generator: &str, seed: u64) -> Result<&GameState> {
        let generator = self.generators.map_generator(generator)?;
        let mut ids = IdAllocator::new();
        let generated = generator.generate(seed, &mut ids);

        let player = self
            .content
            .create_character(&mut ids, &self.player_template, generated.player_start)?;
        if !player.is_player {
            return Err(RuntimeError::NotAPlayerTemplate(self.player_template.clone()));
        }

        let state = GameState::new(generated.map, player)
            .with_scripts(generated.scripts)
            .with_ids(ids);

        self.animations.request_new_game();
        let state = self.engine().process_until_player_ready(&state)?;
        tracing::info!(
            generator = generator.key(),
            seed,
            scripts = state.scripts.len(),
            "new game"
        );
        Ok(self.state.insert(state))
    }

    /// Executes a player command and runs the world until the player may act again.
    pub fn act(&mut self, action: Action) -> Result<&GameState> {
        let current = self.active_state()?;
        if !current.player.is_alive() {
            return Err(RuntimeError::PlayerDead);
        }

        let next = self.engine().act_player(current, &action)?;
        tracing::debug!(
            action = action.as_snake_case(),
            round = next.round,
            health = next.player.health.current,
            enemies = next.enemies.len(),
            "player command resolved"
        );
        Ok(self.state.insert(next))
    }

    fn player_id(&self) -> Result<EntityId> {
        Ok(self.active_state()?.player.id)
    }

    pub fn move_player(&mut self, direction: Direction) -> Result<&GameState> {
        let actor = self.player_id()?;
        self.act(MoveAction::new(actor, direction).into())
    }

    pub fn wait(&mut self) -> Result<&GameState> {
        let actor = self.player_id()?;
        self.act(WaitAction::new(actor).into())
    }

    pub fn use_skill(&mut self, skill: EntityId, target: Point) -> Result<&GameState> {
        let actor = self.player_id()?;
        self.act(UseSkillAction::new(actor, skill, target).into())
    }

    // ===== persistence =====

    pub fn save(&self) -> Result<()> {
        let state = self.active_state()?;
        let bytes = SaveGame::capture(state)?.to_bytes()?;
        self.storage.save(&bytes)?;
        tracing::info!(round = state.round, "game saved");
        Ok(())
    }

    /// Replaces the current match with the saved one. Returns `false` when the slot is empty.
    pub fn load(&mut self) -> Result<bool> {
        let Some(bytes) = self.storage.load()? else {
            return Ok(false);
        };
        let state = SaveGame::from_bytes(&bytes)?.restore(self.generators.as_ref())?;
        tracing::info!(round = state.round, "game loaded");
        self.state = Some(state);
        Ok(true)
    }

    pub fn has_save(&self) -> bool {
        self.storage.exists()
    }

    pub fn delete_save(&self) -> Result<()> {
        Ok(self.storage.delete()?)
    }
}

/// Builder for [`Session`]. Only the content library is mandatory.
pub struct SessionBuilder {
    config: GameConfig,
    content: Option<Arc<dyn ContentOracle>>,
    generators: Option<Arc<dyn GeneratorOracle>>,
    animations: Option<Arc<dyn AnimationSink>>,
    storage: Option<Box<dyn SaveStorage>>,
    player_template: String,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            content: None,
            generators: None,
            animations: None,
            storage: None,
            player_template: DEFAULT_PLAYER_TEMPLATE.to_owned(),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn content(mut self, content: Arc<dyn ContentOracle>) -> Self {
        self.content = Some(content);
        self
    }

    /// Defaults to [`GeneratorRegistry::standard`].
    pub fn generators(mut self, generators: Arc<dyn GeneratorOracle>) -> Self {
        self.generators = Some(generators);
        self
    }

    /// Defaults to discarding every request.
    pub fn animations(mut self, animations: Arc<dyn AnimationSink>) -> Self {
        self.animations = Some(animations);
        self
    }

    /// Defaults to an in-memory slot.
    pub fn storage(mut self, storage: impl SaveStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn player_template(mut self, name: impl Into<String>) -> Self {
        self.player_template = name.into();
        self
    }

    pub fn build(self) -> Result<Session> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        Ok(Session {
            config: self.config,
            content,
            generators: self
                .generators
                .unwrap_or_else(|| Arc::new(GeneratorRegistry::standard())),
            animations: self.animations.unwrap_or_else(|| Arc::new(NoopAnimations)),
            storage: self
                .storage
                .unwrap_or_else(|| Box::new(InMemoryStorage::new())),
            player_template: self.player_template,
            state: None,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
