use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Root of this test binary's private asset tree. Created once per process
/// and registered as the engine's asset root; write fixtures below it with
/// [`write_fixture`].
pub fn fixture_root() -> &'static Path {
    static ROOT: OnceLock<PathBuf> = OnceLock::new();
    ROOT.get_or_init(|| {
        let dir = tempfile::tempdir()
            .expect("failed to create fixture dir")
            .into_path();
        stage_ngin::resources::set_asset_root(&dir);
        dir
    })
}

/// Write one fixture file below the asset root, creating parent directories.
pub fn write_fixture(relative: &str, contents: &[u8]) {
    let path = fixture_root().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture dirs");
    }
    fs::write(&path, contents).expect("failed to write fixture");
}

/// One placement node in the positional wire convention: child block 0 is an
/// (unused) header, block 1 the scalar parameters, block 2 the transform
/// anchor with position and rotation leaves.
pub fn object_node(
    type_name: &str,
    params: &[&str],
    position: [&str; 3],
    rotation: [&str; 4],
) -> String {
    let params_xml: String = params
        .iter()
        .map(|p| format!("<value>{p}</value>"))
        .collect();
    format!(
        "<object type=\"{type_name}\"><head/><parameters>{params_xml}</parameters>\
         <transform><anchor>\
         <position><x>{}</x><y>{}</y><z>{}</z></position>\
         <rotation><x>{}</x><y>{}</y><z>{}</z><w>{}</w></rotation>\
         </anchor></transform></object>",
        position[0], position[1], position[2], rotation[0], rotation[1], rotation[2], rotation[3],
    )
}

/// A node missing its transform block: decodes must fail, batches must not.
pub fn malformed_node(type_name: &str) -> String {
    format!("<object type=\"{type_name}\"><head/><parameters/></object>")
}

pub fn set_document(nodes: &[String]) -> String {
    format!("<set>{}</set>", nodes.concat())
}

/// A minimal but complete glTF source: one skinned triangle node named
/// `<mesh_name>.001` plus one unskinned helper node sharing the same mesh.
/// Geometry is a unit right triangle with UVs matching its positions, so the
/// loader's V-flip and normal recomputation have known expected outputs.
pub fn tiny_gltf(mesh_name: &str) -> String {
    let mut bytes: Vec<u8> = Vec::new();
    // positions (0,0,0) (1,0,0) (0,1,0)
    for f in [
        0.0f32, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ] {
        bytes.extend_from_slice(&f.to_le_bytes());
    }
    // uvs (0,0) (1,0) (0,1)
    for f in [0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0] {
        bytes.extend_from_slice(&f.to_le_bytes());
    }
    // indices 0 1 2 (u16)
    for i in [0u16, 1, 2] {
        bytes.extend_from_slice(&i.to_le_bytes());
    }
    let uri = format!(
        "data:application/octet-stream;base64,{}",
        BASE64.encode(&bytes)
    );

    format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0, 1] }}],
  "nodes": [
    {{ "name": "{mesh_name}.001", "mesh": 0, "skin": 0 }},
    {{ "name": "collision_helper", "mesh": 0 }}
  ],
  "skins": [{{ "joints": [0] }}],
  "meshes": [
    {{
      "primitives": [
        {{
          "attributes": {{ "POSITION": 0, "TEXCOORD_0": 1 }},
          "indices": 2,
          "material": 0
        }}
      ]
    }}
  ],
  "materials": [
    {{
      "name": "{mesh_name}_mat",
      "pbrMetallicRoughness": {{ "baseColorFactor": [0.5, 0.5, 0.5, 1.0] }}
    }}
  ],
  "buffers": [{{ "uri": "{uri}", "byteLength": 66 }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 24 }},
    {{ "buffer": 0, "byteOffset": 60, "byteLength": 6 }}
  ],
  "accessors": [
    {{
      "bufferView": 0,
      "componentType": 5126,
      "count": 3,
      "type": "VEC3",
      "min": [0.0, 0.0, 0.0],
      "max": [1.0, 1.0, 0.0]
    }},
    {{ "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC2" }},
    {{ "bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
    )
}

/// Build a synthetic template without any I/O, for seeding the cache.
pub fn seeded_template(name: &str) -> stage_ngin::AssetTemplate {
    use stage_ngin::data_structures::asset::{TemplateMaterial, TemplateMesh, TemplateVertex};

    stage_ngin::AssetTemplate {
        name: name.to_string(),
        meshes: vec![TemplateMesh {
            name: name.to_string(),
            vertices: vec![
                TemplateVertex {
                    position: [0.0, 0.0, 0.0],
                    tex_coords: [0.0, 1.0],
                    normal: [0.0, 0.0, 1.0],
                },
                TemplateVertex {
                    position: [1.0, 0.0, 0.0],
                    tex_coords: [1.0, 1.0],
                    normal: [0.0, 0.0, 1.0],
                },
                TemplateVertex {
                    position: [0.0, 1.0, 0.0],
                    tex_coords: [0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                },
            ],
            indices: vec![0, 1, 2],
            material: 0,
        }],
        materials: vec![TemplateMaterial::default()],
        scale: 0.001,
    }
}
