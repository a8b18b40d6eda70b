//! Sequential streaming of terrain chunk files.

use crate::data_structures::asset::{TemplateMaterial, TemplateMesh};
use crate::data_structures::terrain::{SHADOW_NAME_MARKER, SKY_NAME_MARKER, TerrainModel};
use crate::resources::load_template;

/// Stream the chunk files of one terrain, strictly in list order.
///
/// Terrain loading is best-effort: a chunk that fails to load is logged and
/// skipped, never fatal. Progress is reported exactly once per file (success
/// or failure) as `(index + 1) / total * 100` rounded to three significant
/// digits, so a progress bar stays monotonic and bounded by the known file
/// count. The returned list is whatever survived the stream.
pub async fn stream_terrain(
    terrain: &str,
    files: &[String],
    on_progress: &mut dyn FnMut(f32),
) -> Vec<TerrainModel> {
    let total = files.len();
    let mut models = Vec::new();

    for (index, file) in files.iter().enumerate() {
        let path = format!("terrain/{terrain}/{file}");
        log::info!("loading: {terrain}/{file}");

        let loaded = load_template(&path).await;
        on_progress(to_precision((index + 1) as f32 / total as f32 * 100.0, 3));

        let template = match loaded {
            Ok(template) => template,
            Err(e) => {
                log::error!("error loading terrain chunk: {e}");
                continue;
            }
        };

        if let Some(model) = post_process_chunk(file, template.meshes, template.materials) {
            models.push(model);
        }
    }

    log::info!("finished loading {terrain}");
    models
}

/// Apply the per-chunk naming policies to a successfully loaded chunk.
///
/// The display name is the filename with its extension stripped. A name
/// carrying the sky marker forces every material emissive and transparent so
/// the skybox renders unlit; a name carrying the shadow marker means the
/// chunk only exists to cast baked shadows and is discarded outright.
pub fn post_process_chunk(
    file: &str,
    meshes: Vec<TemplateMesh>,
    mut materials: Vec<TemplateMaterial>,
) -> Option<TerrainModel> {
    let name = file.split('.').next().unwrap_or(file).to_string();

    if name.contains(SHADOW_NAME_MARKER) {
        log::debug!("discarding shadow-only chunk `{name}`");
        return None;
    }

    let sky = name.contains(SKY_NAME_MARKER);
    if sky {
        for material in materials.iter_mut() {
            material.emissive = true;
            material.transparent = true;
        }
    }

    let mut model = TerrainModel::new(name, meshes, materials);
    model.sky = sky;
    Some(model)
}

/// Round to `digits` significant digits (progress text convention).
pub fn to_precision(value: f32, digits: i32) -> f32 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f32.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}
