//! Fetching and parsing of external level resources.
//!
//! Everything the engine consumes (placement documents, manifests, model
//! sources, terrain chunks, collision meshes) comes through [`load_string`] /
//! [`load_binary`], which resolve names against the `assets/` root: plain
//! filesystem reads on native targets, HTTP fetches against the page origin on
//! WASM. All loaders are `async`; the engine awaits them strictly
//! sequentially, so no two loads are ever in flight at once.

pub mod collision;
pub mod manifest;
pub mod template;

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::RwLock;

use thiserror::Error;

pub use collision::load_collision;
pub use manifest::{Manifest, ObjectPhysicsTable, load_manifest, load_object_physics};
pub use template::{TemplateCache, load_template};

/// A resource could not be fetched or parsed.
///
/// Per-item recoverable inside batch loops (one placement node, one terrain
/// chunk); fatal only when the top-level document, manifest or side-table
/// itself fails.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(target_arch = "wasm32")]
    #[error("failed to fetch `{path}`: {source}")]
    Fetch {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed placement document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse model `{path}`: {source}")]
    Model {
        path: String,
        #[source]
        source: gltf::Error,
    },

    #[error("model `{path}` references a buffer that could not be resolved")]
    Buffer { path: String },

    #[error("failed to parse collision mesh `{path}`: {source}")]
    CollisionMesh {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("`{0}` is not present in the manifest")]
    MissingEntry(String),
}

#[cfg(not(target_arch = "wasm32"))]
static ASSET_ROOT: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Override where resource names are resolved on native targets.
///
/// Defaults to `./assets` next to the working directory; embedders (and the
/// integration tests) point this at their own asset tree.
#[cfg(not(target_arch = "wasm32"))]
pub fn set_asset_root(root: impl Into<PathBuf>) {
    *ASSET_ROOT.write().unwrap() = Some(root.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn asset_root() -> PathBuf {
    ASSET_ROOT
        .read()
        .unwrap()
        .clone()
        .unwrap_or_else(|| PathBuf::from("./assets"))
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> reqwest::Url {
    let window = web_sys::window().unwrap();
    let location = window.location();
    let origin = location.origin().unwrap();
    let base = reqwest::Url::parse(&format!("{}/assets/", origin)).unwrap();
    base.join(file_name).unwrap()
}

pub async fn load_string(file_name: &str) -> Result<String, LoadError> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name);
        reqwest::get(url)
            .await
            .map_err(|source| LoadError::Fetch {
                path: file_name.to_string(),
                source,
            })?
            .text()
            .await
            .map_err(|source| LoadError::Fetch {
                path: file_name.to_string(),
                source,
            })?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = asset_root().join(file_name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                path: file_name.to_string(),
                source,
            })?
    };

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> Result<Vec<u8>, LoadError> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name);
        reqwest::get(url)
            .await
            .map_err(|source| LoadError::Fetch {
                path: file_name.to_string(),
                source,
            })?
            .bytes()
            .await
            .map_err(|source| LoadError::Fetch {
                path: file_name.to_string(),
                source,
            })?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = asset_root().join(file_name);
        tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
            path: file_name.to_string(),
            source,
        })?
    };

    Ok(data)
}
