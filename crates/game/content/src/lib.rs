//! Data-driven content and world creation.
//!
//! This crate turns authored data into a ready-to-play game:
//! - Effect catalogs, registered objects, characters, and scenes (RON)
//! - Game configuration (TOML)
//! - Authoring-time validation of containers, slots, and state machines
//! - Assembly of the opening [`GameState`](tale_core::GameState)
//!
//! File loaders sit behind the `loaders` feature; the authoring shapes,
//! validation, and [`WorldBuilder`] work on in-memory data as well.

pub mod content;
pub mod specs;
pub mod validate;
pub mod world;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::{ContentError, GameContent};
pub use specs::{CharacterSpec, SceneCatalog, SceneSpec};
pub use validate::{ContentIssue, validate_objects, validate_state};
pub use world::{WorldBuilder, WorldError};

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, ConfigLoader, ContentFactory, EffectLoader, LoadResult, ObjectLoader,
    SceneLoader,
};
