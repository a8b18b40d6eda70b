//! Model template loading and the session-lifetime template cache.

use std::collections::HashMap;
use std::io::{BufReader, Cursor};
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use cgmath::{InnerSpace, Vector3};

use crate::data_structures::asset::{
    AssetTemplate, TemplateMaterial, TemplateMesh, TemplateVertex,
};
use crate::data_structures::placement::UNIT_SCALE;
use crate::resources::{LoadError, load_binary};

/// Memoized model templates, keyed by source path.
///
/// Entries live for the whole session; a level viewer sees a bounded set of
/// object types, so nothing is ever evicted. All resolution is sequential, so
/// the map needs no synchronization. A parallel resolver would first need
/// per-key load coalescing here.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: HashMap<String, Arc<AssetTemplate>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached template for `path`, loading it on first use.
    ///
    /// With `bypass_cache` the load always happens and the returned template
    /// is a fresh allocation, shared with nobody that was handed out earlier;
    /// the cache entry is refreshed with it. Call sites that mutate material
    /// state per instance must bypass, otherwise every future cache hit would
    /// see their changes.
    pub async fn get_or_load(
        &mut self,
        path: &str,
        bypass_cache: bool,
    ) -> Result<Arc<AssetTemplate>, LoadError> {
        if !bypass_cache {
            if let Some(template) = self.templates.get(path) {
                return Ok(Arc::clone(template));
            }
        }
        let started = instant::Instant::now();
        let template = Arc::new(load_template(path).await?);
        log::debug!("loaded template `{}` in {:?}", path, started.elapsed());
        self.templates
            .insert(path.to_string(), Arc::clone(&template));
        Ok(template)
    }

    /// Seed the cache with an already-built template (e.g. a preloaded common
    /// asset). Returns the shared handle future hits will receive.
    pub fn insert(&mut self, path: &str, template: AssetTemplate) -> Arc<AssetTemplate> {
        let template = Arc::new(template);
        self.templates
            .insert(path.to_string(), Arc::clone(&template));
        template
    }

    pub fn contains(&self, path: &str) -> bool {
        self.templates.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Load a glTF model source and reduce it to a renderer-ready template.
///
/// Only skinned mesh nodes are kept: the source exporter wraps every visible
/// mesh in a skin, while unskinned nodes carry editor helpers that must not
/// be rendered. UV V-flip and normal recomputation happen here, exactly once
/// per distinct load; cache hits reuse the corrected data untouched.
pub async fn load_template(path: &str) -> Result<AssetTemplate, LoadError> {
    let bytes = load_binary(path).await?;
    let gltf = gltf::Gltf::from_reader(BufReader::new(Cursor::new(bytes))).map_err(|source| {
        LoadError::Model {
            path: path.to_string(),
            source,
        }
    })?;

    // Gather buffer data: GLB blob, embedded data URI, or a sibling file.
    let mut buffer_data: Vec<Vec<u8>> = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => buffer_data.push(blob.to_vec()),
                None => {
                    return Err(LoadError::Buffer {
                        path: path.to_string(),
                    });
                }
            },
            gltf::buffer::Source::Uri(uri) => {
                if let Some(data) = uri.strip_prefix("data:") {
                    let encoded =
                        data.split_once("base64,")
                            .map(|(_, rest)| rest)
                            .ok_or_else(|| LoadError::Buffer {
                                path: path.to_string(),
                            })?;
                    let decoded = BASE64.decode(encoded).map_err(|_| LoadError::Buffer {
                        path: path.to_string(),
                    })?;
                    buffer_data.push(decoded);
                } else {
                    buffer_data.push(load_binary(uri).await?);
                }
            }
        }
    }

    let materials = gltf
        .materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            let diffuse_texture = pbr.base_color_texture().and_then(|info| {
                match info.texture().source().source() {
                    gltf::image::Source::Uri { uri, .. } => Some(uri.to_string()),
                    gltf::image::Source::View { .. } => None,
                }
            });
            TemplateMaterial {
                name: material.name().unwrap_or("unnamed").to_string(),
                base_colour: pbr.base_color_factor(),
                diffuse_texture,
                emissive: false,
                transparent: material.alpha_mode() == gltf::material::AlphaMode::Blend,
            }
        })
        .collect();

    let mut meshes = Vec::new();
    for node in gltf.nodes() {
        if node.skin().is_none() {
            continue;
        }
        let Some(mesh) = node.mesh() else { continue };
        let node_name = node.name().unwrap_or("unknown_mesh");
        let display_name = node_name.split('.').next().unwrap_or(node_name);

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffer_data[buffer.index()]));

            let mut vertices = Vec::new();
            if let Some(positions) = reader.read_positions() {
                positions.for_each(|position| {
                    vertices.push(TemplateVertex {
                        position,
                        ..Default::default()
                    })
                });
            }
            if let Some(tex_coords) = reader.read_tex_coords(0).map(|v| v.into_f32()) {
                // The source pipeline writes V upside down; correct it here so
                // the fix is applied once per loaded template, never per hit.
                for (vertex, uv) in vertices.iter_mut().zip(tex_coords) {
                    vertex.tex_coords = [uv[0], 1.0 - uv[1]];
                }
            }

            let mut indices = Vec::new();
            if let Some(raw) = reader.read_indices() {
                indices.extend(raw.into_u32());
            }

            recompute_normals(&mut vertices, &indices);

            meshes.push(TemplateMesh {
                name: display_name.to_string(),
                vertices,
                indices,
                material: primitive.material().index().unwrap_or(0),
            });
        }
    }

    Ok(AssetTemplate {
        name: path.to_string(),
        meshes,
        materials,
        scale: UNIT_SCALE,
    })
}

/// Rebuild per-vertex normals from triangle geometry, area-weighted.
fn recompute_normals(vertices: &mut [TemplateVertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = [0.0; 3];
    }
    for triangle in indices.chunks(3) {
        let [a, b, c] = match triangle {
            [a, b, c] => [*a as usize, *b as usize, *c as usize],
            _ => continue,
        };
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }
        let p0: Vector3<f32> = vertices[a].position.into();
        let p1: Vector3<f32> = vertices[b].position.into();
        let p2: Vector3<f32> = vertices[c].position.into();
        let face = (p1 - p0).cross(p2 - p0);
        for index in [a, b, c] {
            let accumulated = Vector3::from(vertices[index].normal) + face;
            vertices[index].normal = accumulated.into();
        }
    }
    for vertex in vertices.iter_mut() {
        let normal = Vector3::from(vertex.normal);
        if normal.magnitude2() > 0.0 {
            vertex.normal = normal.normalize().into();
        }
    }
}
