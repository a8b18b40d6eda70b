//! Streamed terrain chunk models.

use crate::data_structures::asset::{TemplateMaterial, TemplateMesh};
use crate::data_structures::placement::UNIT_SCALE;

/// Substring of a chunk's display name that marks it as sky geometry.
pub const SKY_NAME_MARKER: &str = "sky";

/// Substring of a chunk's display name that marks it as shadow-only geometry,
/// which is loaded but never added to the scene.
pub const SHADOW_NAME_MARKER: &str = "sdw";

/// One terrain chunk, ready for the renderer.
///
/// Unlike placement templates, a terrain model is owned by its level load and
/// never shared, so sky post-processing mutates its materials directly.
#[derive(Clone, Debug)]
pub struct TerrainModel {
    /// Chunk filename with the extension stripped.
    pub name: String,
    pub meshes: Vec<TemplateMesh>,
    pub materials: Vec<TemplateMaterial>,
    /// Uniform display scale; chunks always render at the global unit scale.
    pub scale: f32,
    /// Chunks are anchored at the world origin.
    pub position: [f32; 3],
    /// Whether the sky naming policy marked every material emissive and
    /// transparent.
    pub sky: bool,
}

impl TerrainModel {
    pub fn new(name: String, meshes: Vec<TemplateMesh>, materials: Vec<TemplateMaterial>) -> Self {
        Self {
            name,
            meshes,
            materials,
            scale: UNIT_SCALE,
            position: [0.0; 3],
            sky: false,
        }
    }
}
