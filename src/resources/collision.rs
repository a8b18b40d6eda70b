//! Collision mesh loading (OBJ + MTL).

use std::io::{BufReader, Cursor};

use crate::data_structures::collision::{CollisionGroup, CollisionMesh};
use crate::resources::{LoadError, load_string};

/// Load the collision set of one area from
/// `collision/<area>/collision.obj`.
///
/// Sub-meshes come back sorted by name; each carries a `"collision: <name>"`
/// inspection label. Material definitions referenced by the OBJ are resolved
/// but discarded; collision geometry is recolourized by the viewer, not by
/// its source materials.
pub async fn load_collision(area: &str) -> Result<CollisionGroup, LoadError> {
    let file_name = format!("collision/{area}/collision.obj");
    let obj_text = load_string(&file_name).await?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, _materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| async move {
            match load_string(&p).await {
                Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                Err(_) => Err(tobj::LoadError::OpenFileFailed),
            }
        },
    )
    .await
    .map_err(|source| LoadError::CollisionMesh {
        path: file_name.clone(),
        source,
    })?;

    let meshes = models
        .into_iter()
        .map(|m| CollisionMesh {
            info: format!("collision: {}", m.name),
            name: m.name,
            positions: m.mesh.positions,
            normals: m.mesh.normals,
            indices: m.mesh.indices,
        })
        .collect();

    Ok(CollisionGroup::new(area.to_string(), meshes))
}
