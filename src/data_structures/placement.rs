//! Typed placement records decoded from the raw XML document.
//!
//! Placement documents describe object instances positionally rather than by
//! name: child block 1 of a node carries the scalar parameters (dimensions,
//! sub-type names, numeric flags) in document order, and child block 2 carries
//! the transform anchor with a position triple and a rotation quaternion. That
//! convention is load-bearing for existing level data, so the entire decode
//! lives in [`PlacementNode::decode`] and nothing else in the crate touches
//! child indices.

use cgmath::{InnerSpace, Matrix4, One, Quaternion, Vector3};
use thiserror::Error;

/// Raw level units are millimetre-ish; everything renderable is scaled down
/// uniformly by this factor.
pub const UNIT_SCALE: f32 = 0.001;

/// Vertical lift per raw height unit applied to synthetic box volumes so they
/// sit base-down on the recorded point instead of being centred on it. Loaded
/// model templates never receive this lift.
pub const BOX_LIFT_PER_UNIT: f32 = 0.0006;

/// A placement node violated the positional child-index convention.
///
/// Always recoverable at per-node granularity: the batch resolver logs it and
/// moves on to the next node.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("placement node has no `type` attribute")]
    MissingType,

    #[error("`{type_name}` node has no {block} block")]
    MissingBlock {
        type_name: String,
        block: &'static str,
    },

    #[error("{block} block of `{type_name}` node has no component {index}")]
    MissingComponent {
        type_name: String,
        block: &'static str,
        index: usize,
    },

    #[error("`{type_name}` node has no scalar parameter {index}")]
    MissingParam { type_name: String, index: usize },

    #[error("`{type_name}` node holds non-numeric value `{value}`")]
    Numeric { type_name: String, value: String },
}

/// One decoded placement node: the declared type, the ordered scalar
/// parameters and the raw (unscaled) transform values.
///
/// Raw values are kept as-read so that resolvers which adjust a raw field
/// (e.g. the savepoint base lift) can derive an adjusted copy before the
/// transform is scaled.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementNode {
    pub type_name: String,
    pub params: Vec<String>,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
}

impl PlacementNode {
    /// Decode a raw document element into a typed node.
    ///
    /// This is the single schema-validating step: child block 1 must exist and
    /// becomes `params`, child block 2 must contain the transform anchor with
    /// a three-component position and a four-component (x, y, z, w) rotation.
    pub fn decode(element: roxmltree::Node) -> Result<Self, StructureError> {
        let type_name = element
            .attribute("type")
            .ok_or(StructureError::MissingType)?
            .to_string();

        let blocks: Vec<roxmltree::Node> =
            element.children().filter(|c| c.is_element()).collect();

        let param_block = blocks.get(1).ok_or_else(|| StructureError::MissingBlock {
            type_name: type_name.clone(),
            block: "parameter",
        })?;
        let params = param_block
            .children()
            .filter(|c| c.is_element())
            .map(|c| c.text().unwrap_or_default().trim().to_string())
            .collect();

        let transform_block = blocks.get(2).ok_or_else(|| StructureError::MissingBlock {
            type_name: type_name.clone(),
            block: "transform",
        })?;
        let anchor = nth_element(*transform_block, 0).ok_or_else(|| {
            StructureError::MissingBlock {
                type_name: type_name.clone(),
                block: "transform anchor",
            }
        })?;

        let position_block = nth_element(anchor, 0).ok_or_else(|| {
            StructureError::MissingBlock {
                type_name: type_name.clone(),
                block: "position",
            }
        })?;
        let rotation_block = nth_element(anchor, 1).ok_or_else(|| {
            StructureError::MissingBlock {
                type_name: type_name.clone(),
                block: "rotation",
            }
        })?;

        let mut position = [0.0; 3];
        for (index, value) in position.iter_mut().enumerate() {
            *value = leaf_number(position_block, "position", index, &type_name)?;
        }
        let mut rotation = [0.0; 4];
        for (index, value) in rotation.iter_mut().enumerate() {
            *value = leaf_number(rotation_block, "rotation", index, &type_name)?;
        }

        Ok(Self {
            type_name,
            params,
            position,
            rotation,
        })
    }

    /// Scalar parameter `index` as text.
    pub fn param(&self, index: usize) -> Result<&str, StructureError> {
        self.params
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| StructureError::MissingParam {
                type_name: self.type_name.clone(),
                index,
            })
    }

    /// Scalar parameter `index` parsed as a number.
    pub fn param_f32(&self, index: usize) -> Result<f32, StructureError> {
        let raw = self.param(index)?;
        raw.parse().map_err(|_| StructureError::Numeric {
            type_name: self.type_name.clone(),
            value: raw.to_string(),
        })
    }

    /// Box dimensions in renderable units. The source format stores them as
    /// params (depth, width, height); renderable order is (width, height,
    /// depth).
    pub fn box_dimensions(&self) -> Result<Vector3<f32>, StructureError> {
        Ok(Vector3::new(
            self.param_f32(1)?,
            self.param_f32(2)?,
            self.param_f32(0)?,
        ) * UNIT_SCALE)
    }

    /// The node's transform, scaled to renderable units.
    pub fn transform(&self) -> TransformSpec {
        TransformSpec::from_raw(self.position, self.rotation)
    }

    /// The node's transform with the base-down lift applied for synthetic box
    /// volumes (raw height is scalar parameter 2).
    pub fn box_transform(&self) -> Result<TransformSpec, StructureError> {
        let mut transform = self.transform();
        transform.position.y += self.param_f32(2)? * BOX_LIFT_PER_UNIT;
        Ok(transform)
    }

    /// A copy of this node with the four leading scalar parameters rotated
    /// left by one (params[0..4] become params[1], [2], [3], [0]).
    ///
    /// The hint-collision variant of the source format stores its box fields
    /// in this shifted order; the reordering is reproduced exactly as
    /// observed. The input node is never modified.
    pub fn with_params_rotated_left(&self) -> Result<Self, StructureError> {
        if self.params.len() < 4 {
            return Err(StructureError::MissingParam {
                type_name: self.type_name.clone(),
                index: 3,
            });
        }
        let mut rotated = self.clone();
        rotated.params[..4].rotate_left(1);
        Ok(rotated)
    }

    /// A copy of this node whose raw vertical position is raised by `factor`
    /// of the raw height (scalar parameter 2). Applied before decoding so the
    /// adjusted height flows into the scaled transform.
    pub fn with_raised_base(&self, factor: f32) -> Result<Self, StructureError> {
        let mut raised = self.clone();
        raised.position[1] += self.param_f32(2)? * factor;
        Ok(raised)
    }
}

fn nth_element<'a, 'd>(
    node: roxmltree::Node<'a, 'd>,
    index: usize,
) -> Option<roxmltree::Node<'a, 'd>> {
    node.children().filter(|c| c.is_element()).nth(index)
}

fn leaf_number(
    block: roxmltree::Node,
    name: &'static str,
    index: usize,
    type_name: &str,
) -> Result<f32, StructureError> {
    let leaf = nth_element(block, index).ok_or_else(|| StructureError::MissingComponent {
        type_name: type_name.to_string(),
        block: name,
        index,
    })?;
    let raw = leaf.text().unwrap_or_default().trim();
    raw.parse().map_err(|_| StructureError::Numeric {
        type_name: type_name.to_string(),
        value: raw.to_string(),
    })
}

/// Position and rotation of one placed object in renderable units.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformSpec {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl TransformSpec {
    /// Scale a raw position and normalize a raw (x, y, z, w) quaternion.
    ///
    /// The rotation is forced to unit magnitude whatever the input magnitude
    /// was; a degenerate zero-length rotation falls back to the identity.
    pub fn from_raw(position: [f32; 3], rotation: [f32; 4]) -> Self {
        let [x, y, z, w] = rotation;
        let rotation = Quaternion::new(w, x, y, z);
        let rotation = if rotation.magnitude2() > 0.0 {
            rotation.normalize()
        } else {
            Quaternion::one()
        };
        Self {
            position: Vector3::from(position) * UNIT_SCALE,
            rotation,
        }
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.rotation)
    }
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        }
    }
}
