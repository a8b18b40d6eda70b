//! Static collision geometry for one level area.

use crate::data_structures::placement::UNIT_SCALE;

/// One named collision sub-mesh. Geometry is kept flat (positions as x, y, z
/// triples, triangle indices) so the renderer can upload it directly.
#[derive(Clone, Debug)]
pub struct CollisionMesh {
    pub name: String,
    /// Inspection label, `"collision: <name>"`.
    pub info: String,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// The full collision set of one area: sub-meshes sorted by name for a stable
/// hierarchy display.
#[derive(Clone, Debug)]
pub struct CollisionGroup {
    pub name: String,
    pub meshes: Vec<CollisionMesh>,
    pub scale: f32,
    pub position: [f32; 3],
}

impl CollisionGroup {
    pub fn new(name: String, mut meshes: Vec<CollisionMesh>) -> Self {
        meshes.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name,
            meshes,
            scale: UNIT_SCALE,
            position: [0.0; 3],
        }
    }
}
