//! Repository layer for game snapshots.
//!
//! Repositories handle data that CHANGES during gameplay. Authored content
//! (effects, objects, scenes) is loaded by `tale-content` and never stored
//! here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
