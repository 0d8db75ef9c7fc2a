//! Session runtime for the arena.
//!
//! This crate wires the rules engine, the content library, map generators
//! and save storage into a single [`Session`] a presentation shell can drive
//! one player command at a time.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session and its builder
//! - [`save`] defines the persisted match format
//! - [`storage`] provides save-slot adapters (file, memory)
//! - [`animation`] provides sinks for headless runs and tests
pub mod animation;
pub mod error;
pub mod save;
pub mod session;
pub mod storage;

pub use animation::{AnimationEvent, RecordingAnimations, TracingAnimations};
pub use error::{Result, RuntimeError};
pub use save::{SAVE_VERSION, SaveGame};
pub use session::{DEFAULT_PLAYER_TEMPLATE, Session, SessionBuilder};
pub use storage::{FileSlotStorage, InMemoryStorage, SaveStorage, StorageError};
