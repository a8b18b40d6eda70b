//! Template loading and cache-sharing laws.

mod common;

use std::sync::Arc;

use approx::assert_relative_eq;
use common::test_utils::{fixture_root, tiny_gltf, write_fixture};
use stage_ngin::resources::{LoadError, TemplateCache, load_template};

fn ring_fixture() -> &'static str {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        fixture_root();
        write_fixture("objects/common/ring.gltf", tiny_gltf("ring").as_bytes());
    });
    "objects/common/ring.gltf"
}

#[tokio::test]
async fn only_skinned_nodes_are_extracted() {
    let path = ring_fixture();
    let template = load_template(path).await.unwrap();

    // The source holds a skinned node and an unskinned helper sharing the
    // same mesh; only the skinned one survives, under its base name.
    assert_eq!(template.meshes.len(), 1);
    assert_eq!(template.meshes[0].name, "ring");
    assert_eq!(template.meshes[0].vertices.len(), 3);
    assert_eq!(template.meshes[0].indices, vec![0, 1, 2]);
    assert_relative_eq!(template.scale, 0.001);
}

#[tokio::test]
async fn uv_correction_and_normals_are_applied_on_load() {
    let path = ring_fixture();
    let template = load_template(path).await.unwrap();
    let mesh = &template.meshes[0];

    // Source UVs are (0,0) (1,0) (0,1); the V-flip turns them upside down.
    assert_relative_eq!(mesh.vertices[0].tex_coords[1], 1.0);
    assert_relative_eq!(mesh.vertices[1].tex_coords[1], 1.0);
    assert_relative_eq!(mesh.vertices[2].tex_coords[1], 0.0);

    // A counter-clockwise triangle in the XY plane faces +Z.
    for vertex in &mesh.vertices {
        assert_relative_eq!(vertex.normal[0], 0.0);
        assert_relative_eq!(vertex.normal[1], 0.0);
        assert_relative_eq!(vertex.normal[2], 1.0);
    }
}

#[tokio::test]
async fn material_description_carries_over() {
    let path = ring_fixture();
    let template = load_template(path).await.unwrap();

    assert_eq!(template.materials.len(), 1);
    let material = &template.materials[0];
    assert_eq!(material.name, "ring_mat");
    assert_relative_eq!(material.base_colour[0], 0.5);
    assert!(!material.emissive);
    assert!(!material.transparent);
}

#[tokio::test]
async fn shared_loads_return_the_same_template() {
    let path = ring_fixture();
    let mut cache = TemplateCache::new();

    let first = cache.get_or_load(path, false).await.unwrap();
    let second = cache.get_or_load(path, false).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn bypassing_the_cache_yields_an_independent_template() {
    let path = ring_fixture();
    let mut cache = TemplateCache::new();

    let shared = cache.get_or_load(path, false).await.unwrap();
    let fresh = cache.get_or_load(path, true).await.unwrap();

    // Structurally the same model, but not the shared allocation.
    assert!(!Arc::ptr_eq(&shared, &fresh));
    assert_eq!(*shared, *fresh);

    // The bypass load refreshed the cache entry: the next shared hit sees the
    // fresh template, not the one handed out before.
    let after = cache.get_or_load(path, false).await.unwrap();
    assert!(Arc::ptr_eq(&fresh, &after));
}

#[tokio::test]
async fn a_missing_model_is_a_load_error() {
    fixture_root();
    let result = load_template("objects/common/nothing_here.gltf").await;
    match result {
        Err(LoadError::Io { path, .. }) => {
            assert_eq!(path, "objects/common/nothing_here.gltf");
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}
