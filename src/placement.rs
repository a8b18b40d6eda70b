//! Batch resolution of a placement document into an object table.

use crate::data_structures::object_table::ObjectTable;
use crate::data_structures::placement::PlacementNode;
use crate::dispatch;
use crate::resources::{LoadError, ObjectPhysicsTable, TemplateCache};

/// Resolve every node of a placement document, grouped by type.
///
/// Groups appear in order of first sight in the document, before their node
/// is resolved, so a type whose every node resolves to `None` still gets an
/// (empty) group. A node that fails to decode or resolve is logged and
/// skipped; one bad node never aborts the batch. Only a document that does
/// not parse at all is fatal.
pub async fn resolve_placement(
    document: &str,
    cache: &mut TemplateCache,
    physics: &ObjectPhysicsTable,
) -> Result<ObjectTable, LoadError> {
    let document = roxmltree::Document::parse(document)?;
    let root = document.root_element();

    let mut table = ObjectTable::new();
    for element in root.children().filter(|c| c.is_element()) {
        let Some(type_name) = element.attribute("type") else {
            log::error!(
                "skipping <{}> placement node without a `type` attribute",
                element.tag_name().name()
            );
            continue;
        };
        table.ensure_group(type_name);

        let node = match PlacementNode::decode(element) {
            Ok(node) => node,
            Err(e) => {
                log::error!("skipping malformed `{type_name}` node: {e}");
                continue;
            }
        };

        match dispatch::resolve(&node, cache, physics).await {
            Ok(Some(instance)) => table.push(type_name, instance),
            Ok(None) => (),
            Err(e) => log::error!("failed to resolve `{type_name}` node: {e}"),
        }
    }

    Ok(table)
}
