//! # Element Tree
//!
//! Page content is a tree of elements. Every element has the same external
//! shape (`id`, `data`, `elements`, plus free fields such as `type`); an
//! element whose `data.blockId` is populated stands in for a separately
//! authored block document, and its `elements` are a cached copy of that
//! block's content.
//!
//! ```text
//! document
//!   └─ block (blockId = "blk-1")   ← reference block
//!        └─ heading                ← cached copy, owned by "blk-1"
//! ```
//!
//! Code that needs to branch on the difference should go through
//! [`Element::node`], which exposes the two cases as a tagged view.

use crate::EditorError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Editor element (external serde shape)
///
/// `id`, `data` and `elements` are required. Everything else, `type`
/// included, is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    pub data: ElementData,

    /// Ordered children
    pub elements: Vec<Element>,

    /// Fields the editor does not interpret (`type`, `path`, `parent`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-element data bag, kept exactly as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementData {
    pub fields: Map<String, Value>,
}

impl ElementData {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Raw `blockId` as a string, if it is one
    pub fn block_id(&self) -> Option<&str> {
        self.get("blockId").and_then(Value::as_str)
    }
}

/// Tagged view over an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementNode<'a> {
    /// Stands in for an external block document
    Reference { block_id: &'a str },

    /// Regular element owning its children
    Normal { children: &'a [Element] },
}

impl Element {
    pub fn new(id: impl Into<String>, element_type: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("type".to_string(), Value::String(element_type.into()));

        Self {
            id: id.into(),
            data: ElementData::default(),
            elements: Vec::new(),
            extra,
        }
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.elements = children;
        self
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.data.insert("blockId", Value::String(block_id.into()));
        self
    }

    /// Element type, when the node carries a string `type`
    pub fn element_type(&self) -> Option<&str> {
        self.extra.get("type").and_then(Value::as_str)
    }

    pub fn set_element_type(&mut self, element_type: impl Into<String>) {
        self.extra
            .insert("type".to_string(), Value::String(element_type.into()));
    }

    /// Decode an element tree, rejecting nodes that lack required fields
    pub fn from_value(value: Value) -> Result<Self, EditorError> {
        serde_json::from_value(value).map_err(EditorError::MalformedElement)
    }

    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        serde_json::from_str(source).map_err(EditorError::MalformedElement)
    }

    pub fn to_value(&self) -> Result<Value, EditorError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Block id if this element is a reference block.
    ///
    /// A missing, null, non-string or empty `blockId` does not count as populated.
    pub fn reference_block_id(&self) -> Option<&str> {
        self.data.block_id().filter(|id| !id.is_empty())
    }

    pub fn node(&self) -> ElementNode<'_> {
        match self.reference_block_id() {
            Some(block_id) => ElementNode::Reference { block_id },
            None => ElementNode::Normal {
                children: &self.elements,
            },
        }
    }

    /// Depth-first search for an element by id (including self)
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.elements.iter().find_map(|child| child.find(id))
    }

    /// Number of elements in this subtree (including self)
    pub fn count(&self) -> usize {
        1 + self.elements.iter().map(Element::count).sum::<usize>()
    }
}
