//! # Event-Action Pipeline
//!
//! The editor exposes three pipeline surfaces that extensions can intercept:
//!
//! - **getElementTree** (async): rebuild a nested element tree
//! - **getCallableState**: compose the state handed to action handlers
//! - **saveCallablesResults**: commit the state an action handler produced
//!
//! Each surface is a handler. An interceptor receives the next handler in the
//! chain (its continuation) and returns a replacement handler:
//!
//! ```text
//! interceptor: (next) -> (request) -> response
//! ```
//!
//! ## Composition order
//!
//! [`compose`] folds a list so that entry 0 is the outermost handler and the
//! base implementation is the innermost continuation:
//!
//! ```text
//! [a, b, c] + base  =>  a(b(c(base)))
//! ```
//!
//! A request enters `a` first; `c`'s continuation is `base`. Extensions that
//! append to the list therefore run closer to the base than everything that
//! was registered before them.

use crate::{Atom, Element, ElementStore, EditorError};
use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// State carried through the event-action pipeline
pub trait CallableState: Clone + Send + Sync + 'static {
    /// Part of a saved state the editor keeps in its own state atom.
    ///
    /// Fields owned by other atoms should be cleared here so they are not
    /// shadowed by a stale copy on the next read.
    fn committed(&self) -> Self {
        self.clone()
    }
}

/// Wraps a continuation into a replacement handler
pub type Interceptor<H> = Arc<dyn Fn(H) -> H + Send + Sync>;

/// Request for the tree-retrieval surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetElementTreeArgs {
    /// Start from this element; `None` means the document root
    pub element: Option<Element>,
}

pub type ElementTreeFuture = BoxFuture<'static, Result<Element, EditorError>>;
pub type GetElementTree = Arc<dyn Fn(GetElementTreeArgs) -> ElementTreeFuture + Send + Sync>;
pub type GetElementTreeInterceptor = Interceptor<GetElementTree>;

pub type GetCallableState<S> = Arc<dyn Fn(S) -> S + Send + Sync>;
pub type GetCallableStateInterceptor<S> = Interceptor<GetCallableState<S>>;

/// Request and response of the save surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveCallablesResult<S> {
    pub state: S,

    /// Record this save in undo history
    #[serde(default = "default_history")]
    pub history: bool,
}

fn default_history() -> bool {
    true
}

impl<S> SaveCallablesResult<S> {
    /// Save recorded in history
    pub fn new(state: S) -> Self {
        Self {
            state,
            history: default_history(),
        }
    }

    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }
}

pub type SaveCallablesResults<S> =
    Arc<dyn Fn(SaveCallablesResult<S>) -> Result<SaveCallablesResult<S>, EditorError> + Send + Sync>;
pub type SaveCallablesResultsInterceptor<S> = Interceptor<SaveCallablesResults<S>>;

/// Ordered interceptor lists collected from extensions
pub struct ProviderProps<S> {
    pub get_element_tree: Vec<GetElementTreeInterceptor>,
    pub get_callable_state: Vec<GetCallableStateInterceptor<S>>,
    pub save_callables_results: Vec<SaveCallablesResultsInterceptor<S>>,
}

impl<S> Default for ProviderProps<S> {
    fn default() -> Self {
        Self {
            get_element_tree: Vec::new(),
            get_callable_state: Vec::new(),
            save_callables_results: Vec::new(),
        }
    }
}

impl<S> Clone for ProviderProps<S> {
    fn clone(&self) -> Self {
        Self {
            get_element_tree: self.get_element_tree.clone(),
            get_callable_state: self.get_callable_state.clone(),
            save_callables_results: self.save_callables_results.clone(),
        }
    }
}

impl<S> std::fmt::Debug for ProviderProps<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderProps")
            .field("get_element_tree", &self.get_element_tree.len())
            .field("get_callable_state", &self.get_callable_state.len())
            .field("save_callables_results", &self.save_callables_results.len())
            .finish()
    }
}

/// Fold interceptors around `base`; entry 0 becomes the outermost handler
pub fn compose<H>(interceptors: &[Interceptor<H>], base: H) -> H {
    interceptors
        .iter()
        .rev()
        .fold(base, |next, interceptor| interceptor(next))
}

/// Composed event-action pipeline for one editor session
pub struct EventActionHandlerProvider<S> {
    get_element_tree: GetElementTree,
    get_callable_state: GetCallableState<S>,
    save_callables_results: SaveCallablesResults<S>,
    editor_state: Atom<S>,
}

impl<S: CallableState> EventActionHandlerProvider<S> {
    /// Compose the collected interceptor lists with the base implementations
    pub fn new(props: ProviderProps<S>, elements: Atom<ElementStore>, editor_state: Atom<S>) -> Self {
        tracing::debug!(?props, "composing event-action pipeline");

        let base_tree: GetElementTree = Arc::new(move |args: GetElementTreeArgs| {
            let store = elements.get();
            future::ready(store.tree_for(args.element.as_ref())).boxed()
        });

        let base_state: GetCallableState<S> = Arc::new(|state: S| state);

        let committed = editor_state.clone();
        let base_save: SaveCallablesResults<S> = Arc::new(
            move |result: SaveCallablesResult<S>| -> Result<SaveCallablesResult<S>, EditorError> {
                committed.set(result.state.committed())?;
                Ok(result)
            },
        );

        Self {
            get_element_tree: compose(&props.get_element_tree, base_tree),
            get_callable_state: compose(&props.get_callable_state, base_state),
            save_callables_results: compose(&props.save_callables_results, base_save),
            editor_state,
        }
    }

    /// Rebuild the element tree from `element` (or the root)
    pub async fn get_element_tree(&self, element: Option<Element>) -> Result<Element, EditorError> {
        (self.get_element_tree)(GetElementTreeArgs { element }).await
    }

    /// State handed to action handlers, seeded from the editor state
    pub fn get_callable_state(&self) -> S {
        let seed = (*self.editor_state.get()).clone();
        (self.get_callable_state)(seed)
    }

    pub fn save_callables_results(
        &self,
        result: SaveCallablesResult<S>,
    ) -> Result<SaveCallablesResult<S>, EditorError> {
        (self.save_callables_results)(result)
    }

    /// Run an action against the callable state and save what it returns
    pub fn trigger<F>(&self, action: F) -> Result<Option<SaveCallablesResult<S>>, EditorError>
    where
        F: FnOnce(S) -> Option<SaveCallablesResult<S>>,
    {
        match action(self.get_callable_state()) {
            Some(result) => self.save_callables_results(result).map(Some),
            None => Ok(None),
        }
    }

    pub fn editor_state(&self) -> &Atom<S> {
        &self.editor_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    impl CallableState for u32 {}

    fn tagging(tag: &'static str, log: Arc<Mutex<Vec<String>>>) -> Interceptor<GetCallableState<Vec<String>>> {
        Arc::new(move |next: GetCallableState<Vec<String>>| -> GetCallableState<Vec<String>> {
            let log = log.clone();
            Arc::new(move |mut state: Vec<String>| {
                log.lock().push(format!("enter {}", tag));
                state.push(tag.to_string());
                let state = next(state);
                log.lock().push(format!("leave {}", tag));
                state
            })
        })
    }

    #[test]
    fn test_compose_first_entry_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let list = vec![tagging("a", log.clone()), tagging("b", log.clone())];
        let base: GetCallableState<Vec<String>> = Arc::new(|mut state: Vec<String>| {
            state.push("base".to_string());
            state
        });

        let composed = compose(&list, base);
        let state = composed(Vec::new());

        assert_eq!(state, vec!["a", "b", "base"]);
        assert_eq!(*log.lock(), vec!["enter a", "enter b", "leave b", "leave a"]);
    }

    #[test]
    fn test_compose_empty_is_base() {
        let base: GetCallableState<u32> = Arc::new(|n: u32| n + 1);
        let composed = compose(&[], base);
        assert_eq!(composed(1), 2);
    }

    #[test]
    fn test_save_result_history_defaults_to_true() {
        let result: SaveCallablesResult<u32> = serde_json::from_str(r#"{"state": 3}"#).unwrap();
        assert!(result.history);
        assert!(SaveCallablesResult::new(3).history);
        assert!(!SaveCallablesResult::new(3).with_history(false).history);
    }

    #[test]
    fn test_base_save_commits_editor_state() {
        let provider = EventActionHandlerProvider::new(
            ProviderProps::default(),
            Atom::new("elements", ElementStore::new()),
            Atom::new("editor", 0u32),
        );

        let result = provider.save_callables_results(SaveCallablesResult::new(5)).unwrap();
        assert_eq!(result, SaveCallablesResult::new(5));
        assert_eq!(*provider.editor_state().get(), 5);
        assert_eq!(provider.get_callable_state(), 5);
    }

    #[test]
    fn test_trigger_without_result_skips_save() {
        let provider = EventActionHandlerProvider::new(
            ProviderProps::default(),
            Atom::new("elements", ElementStore::new()),
            Atom::new("editor", 1u32),
        );

        assert!(provider.trigger(|_| None).unwrap().is_none());

        let saved = provider
            .trigger(|state| Some(SaveCallablesResult::new(state + 1).with_history(false)))
            .unwrap()
            .unwrap();
        assert_eq!(saved.state, 2);
        assert!(!saved.history);
        assert_eq!(*provider.editor_state().get(), 2);
    }

    #[test]
    fn test_frozen_editor_state_fails_save() {
        let editor = Atom::new("editor", 0u32);
        editor.freeze();
        let provider = EventActionHandlerProvider::new(
            ProviderProps::default(),
            Atom::new("elements", ElementStore::new()),
            editor,
        );

        let err = provider.save_callables_results(SaveCallablesResult::new(1)).unwrap_err();
        assert!(matches!(err, EditorError::ReadOnly { .. }));
    }
}
