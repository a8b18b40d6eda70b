//! Type-keyed resolution of one placement node into an asset instance.
//!
//! Every known placement type has one match arm in [`resolve`]; anything else
//! falls through to `None`, which is a valid outcome, not an error. Resolvers
//! get the decoded node plus explicit handles to the template cache and the
//! object-physics side-table; nothing is captured implicitly, so each arm can
//! be exercised in isolation.

use cgmath::Vector2;
use thiserror::Error;

use crate::data_structures::asset::{AssetInstance, Colour, MaterialOverride, Visual};
use crate::data_structures::placement::{PlacementNode, StructureError};
use crate::resources::{LoadError, ObjectPhysicsTable, TemplateCache};

/// Colour presets for the synthetic volume types.
pub const EVENT_VOLUME_COLOUR: Colour = [0.0, 1.0, 0.0, 0.5];
pub const CAMERA_VOLUME_COLOUR: Colour = [1.0, 0.0, 0.0, 0.5];
pub const AMIGO_VOLUME_COLOUR: Colour = [1.0, 0.0, 1.0, 0.5];
pub const HINT_VOLUME_COLOUR: Colour = [1.0, 1.0, 0.0, 0.5];
pub const BLOCKER_VOLUME_COLOUR: Colour = [0.0, 0.0, 1.0, 0.5];

/// How far a savepoint's raw base is raised, per raw height unit, before its
/// transform is decoded.
pub const SAVEPOINT_BASE_RAISE: f32 = 0.1;

const RING_MODEL: &str = "objects/common/ring.gltf";
const GOALRING_MODEL: &str = "objects/common/goalring.gltf";
const DASHRING_MODEL: &str = "objects/common/dashring.gltf";
const DASHPANEL_MODEL: &str = "objects/common/dashpanel.gltf";
const TRIALPILLAR_MODEL: &str = "objects/town/trialpillar.gltf";
const EAGLE_MODEL: &str = "objects/valley/eagle.gltf";
const CREST_MODEL: &str = "objects/town/crest.gltf";
const WARPGATE_MODEL: &str = "objects/town/warpgate.gltf";
const SAVEPOINT_MODEL: &str = "objects/common/savepoint.gltf";
const SPRING_MODEL: &str = "objects/common/spring.gltf";
const HINT_MODEL: &str = "objects/common/hint.gltf";

/// A single node failed to resolve. Callers treat this as a per-node failure
/// and keep going; the batch never aborts.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Resolve a decoded placement node into zero or one asset instance.
///
/// `None` covers both "recognized type with nothing to show" (an
/// object-physics entry missing from the side-table) and "unrecognized type";
/// neither is logged as a failure.
pub async fn resolve(
    node: &PlacementNode,
    cache: &mut TemplateCache,
    physics: &ObjectPhysicsTable,
) -> Result<Option<AssetInstance>, ResolveError> {
    let instance = match node.type_name.as_str() {
        "eventbox" => Some(make_box(node, EVENT_VOLUME_COLOUR, node.param(3)?)?),

        "cameraeventbox" => Some(make_box(node, CAMERA_VOLUME_COLOUR, "cameraeventbox")?),

        "amigo_collision" => Some(make_box(node, AMIGO_VOLUME_COLOUR, "amigo_collision")?),

        "terrainblocker" => Some(make_box(node, BLOCKER_VOLUME_COLOUR, "terrainblocker")?),

        // This variant stores its four leading scalars shifted by one slot;
        // the cyclic reorder matches the data as shipped, not a derivation.
        "common_hint_collision" => {
            let rotated = node.with_params_rotated_left()?;
            let label = rotated.param(3)?.to_string();
            Some(make_box(&rotated, HINT_VOLUME_COLOUR, &label)?)
        }

        "ring" => Some(make_model(cache, RING_MODEL, node, "ring", false).await?),

        "goalring" => Some(make_model(cache, GOALRING_MODEL, node, "goalring", false).await?),

        "common_dashring" => Some(make_model(cache, DASHRING_MODEL, node, "dashring", false).await?),

        "dashpanel" => Some(make_model(cache, DASHPANEL_MODEL, node, "dashpanel", false).await?),

        "trial_post" => Some(make_model(cache, TRIALPILLAR_MODEL, node, "trial_post", false).await?),

        "eagle" => Some(make_model(cache, EAGLE_MODEL, node, "eagle", false).await?),

        "kingdomcrest" => {
            let mut instance = make_model(cache, CREST_MODEL, node, "kingdomcrest", false).await?;
            instance.material.transparent = true;
            Some(instance)
        }

        // Warpgates share one model but each shows its own destination panel,
        // so the template is loaded fresh (bypassing the cache) and the
        // atlas offset plus emissive state travel on the instance.
        "warpgate" => {
            let destination = node.param(0)?.to_string();
            let mut instance = make_model(
                cache,
                WARPGATE_MODEL,
                node,
                format!("event: {destination}"),
                true,
            )
            .await?;
            instance.material.emissive = true;
            instance.material.atlas_offset = warp_destination_offset(&destination);
            Some(instance)
        }

        "objectphysics" => {
            let sub_type = node.param(0)?;
            match physics.get(sub_type) {
                Some(path) => {
                    let path = format!("objects/{path}.gltf");
                    Some(make_model(cache, &path, node, sub_type, false).await?)
                }
                None => {
                    log::debug!("no object mapping for `{sub_type}`");
                    None
                }
            }
        }

        "savepoint" => {
            let raised = node.with_raised_base(SAVEPOINT_BASE_RAISE)?;
            Some(make_model(cache, SAVEPOINT_MODEL, &raised, "savepoint", false).await?)
        }

        "spring" => Some(make_model(cache, SPRING_MODEL, node, "spring", false).await?),

        "common_hint" => {
            let label = node.param(0)?.to_string();
            Some(make_model(cache, HINT_MODEL, node, label, false).await?)
        }

        _ => None,
    };

    Ok(instance)
}

/// Atlas offset of a warpgate destination tag in the 4x3 destination grid.
/// Unknown tags get no offset.
pub fn warp_destination_offset(destination: &str) -> Option<Vector2<f32>> {
    let (u, v) = match destination {
        "goto_wvo" => (0.0, 0.0),
        "goto_dtd" => (0.25, 0.0),
        "goto_wap" => (0.5, 0.0),
        "goto_csc" => (0.75, 0.0),
        "goto_flc" => (0.0, 0.33),
        "goto_rct" => (0.25, 0.33),
        "goto_tpj" => (0.5, 0.33),
        "goto_kdv" => (0.75, 0.33),
        "goto_aqa" => (0.0, 0.66),
        "goto_end" => (0.25, 0.66),
        _ => return None,
    };
    Some(Vector2::new(u, v))
}

fn make_box(
    node: &PlacementNode,
    colour: Colour,
    label: &str,
) -> Result<AssetInstance, StructureError> {
    let label = if label.is_empty() { "undefined" } else { label };
    Ok(AssetInstance {
        info: format!("event: {label}"),
        transform: node.box_transform()?,
        visual: Visual::Box {
            dimensions: node.box_dimensions()?,
            colour,
        },
        material: MaterialOverride {
            transparent: colour[3] < 1.0,
            ..Default::default()
        },
    })
}

async fn make_model(
    cache: &mut TemplateCache,
    path: &str,
    node: &PlacementNode,
    info: impl Into<String>,
    bypass_cache: bool,
) -> Result<AssetInstance, ResolveError> {
    let template = cache.get_or_load(path, bypass_cache).await?;
    Ok(AssetInstance {
        info: info.into(),
        transform: node.transform(),
        visual: Visual::Model { template },
        material: MaterialOverride::default(),
    })
}
