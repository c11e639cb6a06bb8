//! Registered object loader.
//!
//! `objects.ron` holds definitions of items that start out in slots. Slots
//! reference their occupant by id only, so these definitions seed the
//! state's object registry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tale_core::ObjectDefinition;

use crate::loaders::{LoadResult, read_file};

/// Object catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectCatalog {
    pub objects: Vec<ObjectDefinition>,
}

/// Loader for registered object definitions from RON files.
pub struct ObjectLoader;

impl ObjectLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ObjectDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ObjectDefinition>> {
        let catalog: ObjectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse object catalog RON: {}", e))?;

        Ok(catalog.objects)
    }
}
