//! The level environment: session state and the load entry points.
//!
//! An [`Environment`] owns everything that survives between loads: the
//! template cache and the current placement table, terrain list and
//! collision group. Each load builds its result completely and then swaps
//! it in atomically; a load that fails part-way leaves the previous result
//! untouched apart from the swap at the end, and per-item failures inside a
//! load only thin out that load's own result.

use crate::data_structures::asset::AssetInstance;
use crate::data_structures::collision::CollisionGroup;
use crate::data_structures::object_table::ObjectTable;
use crate::data_structures::terrain::TerrainModel;
use crate::placement::resolve_placement;
use crate::resources::{
    self, LoadError, ObjectPhysicsTable, TemplateCache, load_manifest, load_object_physics,
    load_string,
};
use crate::terrain::stream_terrain;

/// One viewer session over a set of level assets.
#[derive(Default)]
pub struct Environment {
    cache: TemplateCache,
    /// The current results; each is replaced wholesale by its load method.
    pub placement: ObjectTable,
    pub terrain: Vec<TerrainModel>,
    pub collision: Option<CollisionGroup>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The marker every scene starts with, anchored at the world origin.
    pub fn origin_marker() -> AssetInstance {
        AssetInstance::origin_marker()
    }

    /// Load and resolve a placement document, replacing the current table.
    ///
    /// The document and the object-physics side-table are fetched up front
    /// and are fatal on failure; everything after that is per-node
    /// best-effort.
    pub async fn load_placement(&mut self, placement: &str) -> Result<&ObjectTable, LoadError> {
        let physics: ObjectPhysicsTable = load_object_physics().await?;
        let document = load_string(&format!("placement/{placement}")).await?;

        let started = instant::Instant::now();
        let table = resolve_placement(&document, &mut self.cache, &physics).await?;
        log::info!(
            "resolved `{}`: {} groups, {} instances in {:?}",
            placement,
            table.len(),
            table.instance_count(),
            started.elapsed()
        );

        self.placement = table;
        Ok(&self.placement)
    }

    /// Drop the current placement table.
    pub fn clear_placement(&mut self) {
        self.placement = ObjectTable::new();
    }

    /// Stream the terrain chunks named by the manifest for `terrain`,
    /// replacing the current terrain list.
    ///
    /// The manifest fetch and a missing terrain id are fatal; individual
    /// chunks are best-effort. `on_progress` fires once per chunk file.
    pub async fn load_terrain(
        &mut self,
        terrain: &str,
        on_progress: &mut dyn FnMut(f32),
    ) -> Result<&[TerrainModel], LoadError> {
        let manifest = load_manifest().await?;
        let files = manifest.terrain_files(terrain)?;

        self.terrain = stream_terrain(terrain, files, on_progress).await;
        Ok(&self.terrain)
    }

    /// Load the collision set of one area, replacing the current group.
    pub async fn load_collision(&mut self, area: &str) -> Result<&CollisionGroup, LoadError> {
        let group = resources::load_collision(area).await?;
        log::info!(
            "loaded collision `{}`: {} sub-meshes",
            area,
            group.meshes.len()
        );
        Ok(self.collision.insert(group))
    }

    /// Shared template cache (templates persist for the whole session).
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TemplateCache {
        &mut self.cache
    }
}
