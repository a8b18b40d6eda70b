//! stage-ngin
//!
//! A lightweight, renderer-agnostic engine for 3D level viewers, focused on
//! native and WASM compatibility. The crate turns loosely-schematized level
//! data (placement documents, terrain chunk streams, collision meshes) into
//! plain, renderer-consumable records: transforms, templates, instances and
//! per-type groupings. It owns no GPU resources and runs its loads strictly
//! sequentially over async I/O.
//!
//! High-level modules
//! - `data_structures`: engine data models (placement nodes, assets, tables)
//! - `dispatch`: type-keyed resolution of one placement node
//! - `environment`: session state and the load entry points
//! - `placement`: batch resolution of a whole placement document
//! - `resources`: fetching and parsing of documents, models and manifests
//! - `terrain`: sequential terrain chunk streaming with progress reporting
//!

pub mod data_structures;
pub mod dispatch;
pub mod environment;
pub mod placement;
pub mod resources;
pub mod terrain;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use data_structures::asset::{AssetInstance, AssetTemplate, MaterialOverride, Visual};
pub use data_structures::object_table::{ObjectGroup, ObjectTable};
pub use data_structures::placement::{PlacementNode, StructureError, TransformSpec};
pub use environment::Environment;
pub use resources::{LoadError, Manifest, TemplateCache};

/// Initialize logging for the current platform: `env_logger` on native,
/// the browser console on WASM.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap();
    }
}
