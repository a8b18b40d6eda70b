//! Collision OBJ loading.

mod common;

use approx::assert_relative_eq;
use common::test_utils::{fixture_root, write_fixture};
use stage_ngin::resources::{LoadError, load_collision};

const COLLISION_OBJ: &str = "\
mtllib collision.mtl
o zone_b
v 0 0 0
v 1000 0 0
v 0 1000 0
usemtl flat_gray
f 1 2 3
o zone_a
v 0 0 1000
v 1000 0 1000
v 0 1000 1000
usemtl flat_gray
f 4 5 6
";

const COLLISION_MTL: &str = "\
newmtl flat_gray
Kd 0.5 0.5 0.5
";

fn collision_fixture() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        fixture_root();
        write_fixture("collision/town/collision.obj", COLLISION_OBJ.as_bytes());
        write_fixture("collision.mtl", COLLISION_MTL.as_bytes());
    });
}

#[tokio::test]
async fn sub_meshes_come_back_sorted_and_labelled() {
    collision_fixture();
    let group = load_collision("town").await.unwrap();

    assert_eq!(group.name, "town");
    let names: Vec<&str> = group.meshes.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["zone_a", "zone_b"]);
    assert_eq!(group.meshes[0].info, "collision: zone_a");
    assert_eq!(group.meshes[1].info, "collision: zone_b");
}

#[tokio::test]
async fn geometry_stays_raw_and_the_group_carries_the_scale() {
    collision_fixture();
    let group = load_collision("town").await.unwrap();

    // Raw level units stay in the mesh; the renderer applies the group scale.
    assert_relative_eq!(group.scale, 0.001);
    assert_eq!(group.position, [0.0; 3]);

    let zone_b = &group.meshes[1];
    assert_eq!(zone_b.positions.len(), 9);
    assert_eq!(zone_b.indices.len(), 3);
    assert!(zone_b.positions.iter().any(|&p| p == 1000.0));
}

#[tokio::test]
async fn a_missing_area_is_fatal() {
    collision_fixture();
    let result = load_collision("nowhere").await;
    assert!(matches!(result, Err(LoadError::Io { .. })));
}
