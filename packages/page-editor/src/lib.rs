//! # Page Builder Page Editor
//!
//! Page editor extension of the event-action pipeline.
//!
//! ## Architecture
//!
//! ```text
//!  page atom ─┐                       ┌─ getElementTree:       sanitize reference blocks
//!             ├─▶ SnapshotCache ─▶ plugin ─ getCallableState:  add page + revisions
//!  revisions ─┘        ▲              └─ saveCallablesResults: propagate saved page
//!                      │                            │
//!                      └──────── page atom.set ◀────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagebuilder_editor::{Atom, ElementStore, EventActionHandlerProvider, PluginRegistry};
//! use pagebuilder_page_editor::{EventActionHandlerPlugin, PageEditorConfig};
//!
//! let plugin = EventActionHandlerPlugin::mount(
//!     page_atom.clone(),
//!     revisions_atom.reader(),
//!     PageEditorConfig::default(),
//! );
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(Box::new(plugin));
//!
//! let provider = EventActionHandlerProvider::new(registry.props(), elements, editor_state);
//! let tree = provider.get_element_tree(None).await?; // reference blocks pruned
//! ```

mod config;
mod page;
mod plugin;
mod propagate;
mod sanitize;
mod snapshot;

pub use config::PageEditorConfig;
pub use page::{
    PageAtomType, PageEditorEventActionCallableState, PageStatus, Revision, RevisionsAtomType,
};
pub use plugin::{EventActionHandlerPlugin, PLUGIN_NAME};
pub use propagate::SavePropagator;
pub use sanitize::{sanitize, sanitize_value};
pub use snapshot::{SnapshotCache, SnapshotSubscription};
