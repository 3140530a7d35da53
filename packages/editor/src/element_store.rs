//! # Element Store
//!
//! The editor keeps elements flat, keyed by id, with children stored as id
//! lists. Nested trees are rebuilt on demand; this is the host's base
//! implementation of tree retrieval.

use crate::{Element, ElementData, EditorError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Element as stored by the editor (children by id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatElement {
    pub id: String,

    pub data: ElementData,

    pub elements: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Uninterpreted fields carried back onto the rebuilt element
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlatElement {
    pub fn new(id: impl Into<String>, element_type: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("type".to_string(), Value::String(element_type.into()));

        Self {
            id: id.into(),
            data: ElementData::default(),
            elements: Vec::new(),
            parent: None,
            extra,
        }
    }
}

/// Id-keyed element storage
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: HashMap<String, FlatElement>,
    root: Option<String>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a nested tree; the tree's root becomes the store root
    pub fn from_tree(tree: &Element) -> Self {
        let mut store = Self::new();
        store.insert_tree(tree, None);
        store.root = Some(tree.id.clone());
        store
    }

    /// Flatten and insert a subtree under `parent`
    pub fn insert_tree(&mut self, tree: &Element, parent: Option<&str>) {
        for child in &tree.elements {
            self.insert_tree(child, Some(&tree.id));
        }

        // `parent` is owned by the store
        let mut extra = tree.extra.clone();
        extra.remove("parent");

        self.elements.insert(
            tree.id.clone(),
            FlatElement {
                id: tree.id.clone(),
                data: tree.data.clone(),
                elements: tree.elements.iter().map(|e| e.id.clone()).collect(),
                parent: parent.map(str::to_string),
                extra,
            },
        );
    }

    pub fn insert(&mut self, element: FlatElement) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn get(&self, id: &str) -> Option<&FlatElement> {
        self.elements.get(id)
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Rebuild the nested tree rooted at `id`
    pub fn tree(&self, id: &str) -> Result<Element, EditorError> {
        let flat = self
            .elements
            .get(id)
            .ok_or_else(|| EditorError::MissingElement { id: id.to_string() })?;

        let elements = flat
            .elements
            .iter()
            .map(|child_id| self.tree(child_id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut extra = flat.extra.clone();
        if let Some(parent) = &flat.parent {
            extra.insert("parent".to_string(), Value::String(parent.clone()));
        }

        Ok(Element {
            id: flat.id.clone(),
            data: flat.data.clone(),
            elements,
            extra,
        })
    }

    /// Rebuild the tree for `element` if given, otherwise from the root
    pub fn tree_for(&self, element: Option<&Element>) -> Result<Element, EditorError> {
        match element.map(|e| e.id.as_str()).or(self.root.as_deref()) {
            Some(id) => self.tree(id),
            None => Err(EditorError::MissingElement {
                id: "<root>".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tree() -> Element {
        Element::new("root", "document").with_children(vec![
            Element::new("a", "block").with_children(vec![Element::new("a1", "heading")]),
            Element::new("b", "block").with_block_id("blk-1"),
        ])
    }

    #[test]
    fn test_flatten_and_rebuild() {
        let store = ElementStore::from_tree(&sample_tree());

        assert_eq!(store.len(), 4);
        assert_eq!(store.root_id(), Some("root"));
        assert_eq!(store.get("a").unwrap().elements, vec!["a1".to_string()]);
        assert_eq!(store.get("a1").unwrap().parent.as_deref(), Some("a"));

        let tree = store.tree("root").unwrap();
        assert_eq!(tree.count(), 4);
        assert_eq!(tree.elements[0].elements[0].id, "a1");
        assert_eq!(tree.elements[1].reference_block_id(), Some("blk-1"));
    }

    #[test]
    fn test_tree_for_subtree() {
        let store = ElementStore::from_tree(&sample_tree());
        let start = Element::new("a", "block");

        let tree = store.tree_for(Some(&start)).unwrap();
        assert_eq!(tree.id, "a");
        assert_eq!(tree.count(), 2);
    }

    #[test]
    fn test_dangling_child_is_error() {
        let mut store = ElementStore::from_tree(&sample_tree());
        store.insert(FlatElement {
            elements: vec!["ghost".to_string()],
            parent: Some("root".to_string()),
            ..FlatElement::new("a", "block")
        });

        let err = store.tree("root").unwrap_err();
        assert!(matches!(err, EditorError::MissingElement { id } if id == "ghost"));
    }

    #[test]
    fn test_rebuild_keeps_uninterpreted_fields() {
        let mut heading = Element::new("a1", "heading");
        heading.extra.insert("path".to_string(), json!(["root", "a", "a1"]));
        heading.data.insert("level", json!(2));
        let tree = Element::new("root", "document")
            .with_children(vec![Element::new("a", "block").with_children(vec![heading])]);

        let rebuilt = ElementStore::from_tree(&tree).tree("root").unwrap();
        let rebuilt_heading = rebuilt.find("a1").unwrap();

        assert_eq!(rebuilt_heading.extra["path"], json!(["root", "a", "a1"]));
        assert_eq!(rebuilt_heading.extra["parent"], json!("a"));
        assert_eq!(rebuilt_heading.element_type(), Some("heading"));
        assert_eq!(rebuilt_heading.data.get("level"), Some(&json!(2)));
    }

    #[test]
    fn test_flat_element_requires_data() {
        let result: Result<FlatElement, _> =
            serde_json::from_value(json!({ "id": "a", "type": "block", "elements": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_store_has_no_root() {
        let store = ElementStore::new();
        assert!(store.is_empty());
        assert!(store.tree_for(None).is_err());
    }
}
