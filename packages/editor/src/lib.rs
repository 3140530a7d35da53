//! # Page Builder Editor
//!
//! Event-action pipeline for the page builder editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ plugins: append interceptors                │
//! │  - getElementTree                           │
//! │  - getCallableState                         │
//! │  - saveCallablesResults                     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ provider: compose lists + base handlers     │
//! │  - tree rebuilt from the element store      │
//! │  - state seeded from the editor state atom  │
//! │  - saves committed to the editor state atom │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor core: trigger actions, read trees    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagebuilder_editor::{Atom, ElementStore, EventActionHandlerProvider, PluginRegistry};
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(Box::new(my_plugin));
//!
//! let provider = EventActionHandlerProvider::new(
//!     registry.props(),
//!     Atom::new("elements", ElementStore::from_tree(&root)),
//!     Atom::new("editor", MyState::default()),
//! );
//!
//! let tree = provider.get_element_tree(None).await?;
//! ```

mod element;
mod element_store;
mod errors;
pub mod event_actions;
mod plugin;
mod state;

pub use element::{Element, ElementData, ElementNode};
pub use element_store::{ElementStore, FlatElement};
pub use errors::EditorError;
pub use event_actions::{
    compose, CallableState, EventActionHandlerProvider, GetCallableState,
    GetCallableStateInterceptor, GetElementTree, GetElementTreeArgs, GetElementTreeInterceptor,
    Interceptor, ProviderProps, SaveCallablesResult, SaveCallablesResults,
    SaveCallablesResultsInterceptor,
};
pub use plugin::{EditorPlugin, PluginRegistry};
pub use state::{Atom, AtomReader, Subscription};
