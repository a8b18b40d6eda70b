//! CPU-side asset data handed to the renderer.
//!
//! The engine never creates GPU resources: a resolved placement is a set of
//! [`AssetInstance`] records, each pairing a transform with either a shared
//! model template or a synthetic primitive, plus the per-instance material
//! overrides. Instantiating actual geometry and submitting it is the
//! renderer's job.

use std::sync::Arc;

use cgmath::Vector2;

use crate::data_structures::placement::TransformSpec;

/// RGBA colour, components in 0..=1.
pub type Colour = [f32; 4];

/// One vertex of a loaded template mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemplateVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

/// One mesh extracted from a loaded model source.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateMesh {
    pub name: String,
    pub vertices: Vec<TemplateVertex>,
    pub indices: Vec<u32>,
    /// Index into the owning template's material list.
    pub material: usize,
}

/// Material description carried alongside a template.
///
/// `emissive` and `transparent` are baked in only for owned models (terrain
/// chunks); shared placement templates stay untouched and per-instance state
/// goes through [`MaterialOverride`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateMaterial {
    pub name: String,
    pub base_colour: Colour,
    pub diffuse_texture: Option<String>,
    pub emissive: bool,
    pub transparent: bool,
}

impl Default for TemplateMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_colour: [1.0, 1.0, 1.0, 1.0],
            diffuse_texture: None,
            emissive: false,
            transparent: false,
        }
    }
}

/// A load-once model template, shared between all instances that reference
/// the same source path.
///
/// Cached templates are read-only: anything instance-specific must be
/// expressed as a [`MaterialOverride`] on the instance.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetTemplate {
    pub name: String,
    pub meshes: Vec<TemplateMesh>,
    pub materials: Vec<TemplateMaterial>,
    /// Uniform display scale applied when instancing the template.
    pub scale: f32,
}

/// What an instance looks like: a shared model template or a synthetic
/// primitive.
#[derive(Clone, Debug)]
pub enum Visual {
    /// Axis-aligned box volume with pre-scaled dimensions.
    Box {
        dimensions: cgmath::Vector3<f32>,
        colour: Colour,
    },
    /// Small marker sphere (used for the world-origin marker).
    Sphere { radius: f32, colour: Colour },
    /// A loaded model template.
    Model { template: Arc<AssetTemplate> },
}

/// Per-instance material mutation, applied by the renderer on top of the
/// instance's visual without touching any shared template.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialOverride {
    /// Mark the material emissive; the emissive map follows the diffuse map
    /// so the glow matches the base texture exactly.
    pub emissive: bool,
    /// Force transparency regardless of what the template says.
    pub transparent: bool,
    /// Texture-atlas offset for the diffuse (and therefore emissive) map.
    pub atlas_offset: Option<Vector2<f32>>,
}

impl MaterialOverride {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// One placed object: visual + transform + the identity label shown on
/// hover/inspection.
#[derive(Clone, Debug)]
pub struct AssetInstance {
    pub info: String,
    pub transform: TransformSpec,
    pub visual: Visual,
    pub material: MaterialOverride,
}

impl AssetInstance {
    /// The small magenta marker every scene starts with, anchored at the
    /// world origin.
    pub fn origin_marker() -> Self {
        Self {
            info: "world origin (0, 0, 0)".to_string(),
            transform: TransformSpec::default(),
            visual: Visual::Sphere {
                radius: 0.1,
                colour: [0.93, 0.0, 0.93, 1.0],
            },
            material: MaterialOverride::default(),
        }
    }
}
