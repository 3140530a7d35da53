//! Page editor state types

use chrono::{DateTime, Utc};
use pagebuilder_editor::{CallableState, Element};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
    Unpublished,
    ReviewRequested,
    ChangesRequested,
}

/// Current page document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAtomType {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub status: PageStatus,

    #[serde(default)]
    pub locked: bool,

    /// Root element of the page content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_on: Option<DateTime<Utc>>,
}

impl PageAtomType {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// One entry of the page's revision list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub title: String,
    pub version: u32,

    #[serde(default)]
    pub status: PageStatus,

    #[serde(default)]
    pub locked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_on: Option<DateTime<Utc>>,
}

pub type RevisionsAtomType = Vec<Revision>;

/// State handed to page editor action handlers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEditorEventActionCallableState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_element: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_element: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageAtomType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revisions: Option<RevisionsAtomType>,
}

impl CallableState for PageEditorEventActionCallableState {
    /// Page and revisions live in their own atoms
    fn committed(&self) -> Self {
        Self {
            page: None,
            revisions: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_decodes_camel_case() {
        let page: PageAtomType = serde_json::from_value(json!({
            "id": "page#0001",
            "title": "Home",
            "path": "/home",
            "version": 1,
            "status": "reviewRequested",
            "savedOn": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(page.status, PageStatus::ReviewRequested);
        assert!(page.content.is_none());
        assert!(page.saved_on.is_some());
    }

    #[test]
    fn test_committed_state_drops_atom_owned_fields() {
        let state = PageEditorEventActionCallableState {
            active_element: Some("el-1".to_string()),
            page: Some(PageAtomType::new("p1", "Home")),
            revisions: Some(vec![]),
            ..Default::default()
        };

        let committed = state.committed();
        assert_eq!(committed.active_element.as_deref(), Some("el-1"));
        assert!(committed.page.is_none());
        assert!(committed.revisions.is_none());
    }

    #[test]
    fn test_empty_callable_state_serializes_to_empty_object() {
        let value = serde_json::to_value(PageEditorEventActionCallableState::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
