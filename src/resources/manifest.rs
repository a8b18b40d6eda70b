//! Level manifest and object-physics side-table.

use std::collections::HashMap;

use serde::Deserialize;

use crate::resources::{LoadError, load_string};

/// Manifest file name under the asset root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Object-physics side-table file name under the asset root.
pub const OBJECT_PHYSICS_FILE: &str = "object_mappings.json";

/// Side-table mapping an object-physics sub-type name to the extensionless
/// path of its model under `objects/`. Consumed read-only during resolution.
pub type ObjectPhysicsTable = HashMap<String, String>;

/// The level index: which collision areas, placement documents and terrain
/// chunk lists exist.
///
/// Terrain chunk lists are ordered; the stream loader walks them as-is.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Manifest {
    /// Area id to its named collision sub-sets.
    #[serde(default)]
    pub collision: HashMap<String, HashMap<String, String>>,

    /// Available placement document names.
    #[serde(default)]
    pub placement: Vec<String>,

    /// Terrain id to the ordered chunk filenames to stream.
    #[serde(default)]
    pub terrain: HashMap<String, Vec<String>>,
}

impl Manifest {
    /// The ordered chunk list of one terrain id.
    pub fn terrain_files(&self, terrain: &str) -> Result<&[String], LoadError> {
        self.terrain
            .get(terrain)
            .map(Vec::as_slice)
            .ok_or_else(|| LoadError::MissingEntry(format!("terrain/{terrain}")))
    }
}

pub async fn load_manifest() -> Result<Manifest, LoadError> {
    let text = load_string(MANIFEST_FILE).await?;
    Ok(serde_json::from_str(&text)?)
}

pub async fn load_object_physics() -> Result<ObjectPhysicsTable, LoadError> {
    let text = load_string(OBJECT_PHYSICS_FILE).await?;
    Ok(serde_json::from_str(&text)?)
}
