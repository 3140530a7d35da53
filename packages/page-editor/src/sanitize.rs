//! # Reference Block Sanitizer
//!
//! Children of a reference block are a cached copy of the referenced block
//! document. They must not leave the pipeline as part of the page, so every
//! reference block in a tree is returned with an empty `elements` list.
//! Everything else is copied as-is.

use pagebuilder_editor::{EditorError, Element, ElementNode};
use serde_json::Value;

/// Copy of `element` with the children of every reference block removed
pub fn sanitize(element: &Element) -> Element {
    let elements = match element.node() {
        ElementNode::Reference { block_id } => {
            tracing::debug!(element = %element.id, block_id, "pruning reference block children");
            Vec::new()
        }
        ElementNode::Normal { children } => children.iter().map(sanitize).collect(),
    };

    Element {
        id: element.id.clone(),
        data: element.data.clone(),
        elements,
        extra: element.extra.clone(),
    }
}

/// Decode and sanitize a JSON element tree.
///
/// Fails with [`EditorError::MalformedElement`] when a node lacks a required
/// field (`id`, `data` or `elements`). Nodes without a reference block come
/// back exactly as given.
pub fn sanitize_value(value: Value) -> Result<Value, EditorError> {
    let element = Element::from_value(value)?;
    sanitize(&element).to_value()
}
