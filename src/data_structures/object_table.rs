//! Per-type grouping of resolved placement instances.

use indexmap::IndexMap;

use crate::data_structures::asset::AssetInstance;

/// All instances of one placement type.
///
/// A group can be empty: the type appeared in the document but never produced
/// a visible instance. Empty groups are still listed (and toggle-able) so the
/// hierarchy view reflects the document faithfully.
#[derive(Debug, Default)]
pub struct ObjectGroup {
    pub name: String,
    pub instances: Vec<AssetInstance>,
}

/// Resolved placement output: type name to group, in order of first
/// appearance in the document.
///
/// A table is built fresh on every placement load and replaces the previous
/// one wholesale; there is no incremental diffing.
#[derive(Debug, Default)]
pub struct ObjectTable {
    groups: IndexMap<String, ObjectGroup>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `type_name` if this is its first appearance. Discovery order
    /// is iteration order.
    pub fn ensure_group(&mut self, type_name: &str) -> &mut ObjectGroup {
        self.groups
            .entry(type_name.to_string())
            .or_insert_with(|| ObjectGroup {
                name: type_name.to_string(),
                ..Default::default()
            })
    }

    /// Append an instance to its type's group.
    pub fn push(&mut self, type_name: &str, instance: AssetInstance) {
        self.ensure_group(type_name).instances.push(instance);
    }

    pub fn get(&self, type_name: &str) -> Option<&ObjectGroup> {
        self.groups.get(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total instance count across all groups.
    pub fn instance_count(&self) -> usize {
        self.groups.values().map(|g| g.instances.len()).sum()
    }
}
