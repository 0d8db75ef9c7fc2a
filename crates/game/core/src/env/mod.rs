//! Collaborators the rules depend on but do not own.
//!
//! Animation presentation, the content library and map generation live
//! outside the core. [`GameEnv`] bundles the pieces the engine needs so every
//! collaborator is passed explicitly; there is no global locator.
mod animation;
mod content;
mod error;

pub use animation::{AnimationInfo, AnimationSink, NoopAnimations};
pub use content::{ContentOracle, GeneratedMap, GeneratorOracle, MapGenerator};
pub use error::OracleError;

use crate::config::GameConfig;

static NOOP_ANIMATIONS: NoopAnimations = NoopAnimations;

/// Aggregates the configuration and collaborators used by the action pipeline.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    animations: &'a dyn AnimationSink,
    content: Option<&'a dyn ContentOracle>,
}

impl<'a> GameEnv<'a> {
    /// Environment with no listener and no content library.
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            config,
            animations: &NOOP_ANIMATIONS,
            content: None,
        }
    }

    #[must_use]
    pub fn with_animations(mut self, animations: &'a dyn AnimationSink) -> Self {
        self.animations = animations;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: &'a dyn ContentOracle) -> Self {
        self.content = Some(content);
        self
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn animations(&self) -> &'a dyn AnimationSink {
        self.animations
    }

    /// Returns the content library, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ContentNotAvailable` if no library was provided.
    pub fn content(&self) -> Result<&'a dyn ContentOracle, OracleError> {
        self.content.ok_or(OracleError::ContentNotAvailable)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}
