//! # Page Editor Event-Action Plugin
//!
//! Appends one interceptor to each event-action surface:
//!
//! - **getElementTree**: delegates with `{ element }`, then strips the cached
//!   children of reference blocks from the returned tree.
//! - **getCallableState**: delegates, then fills `page` and `revisions` from
//!   the [`SnapshotCache`] where the upstream state has none.
//! - **saveCallablesResults**: delegates, pushes the committed page into the
//!   page atom, and returns its own input rather than the continuation's
//!   output.
//!
//! The interceptors are built once at mount. They read page state through
//! the snapshot cache, so a chain composed before a page update still sees
//! the update when it runs.

use crate::config::PageEditorConfig;
use crate::page::{PageAtomType, PageEditorEventActionCallableState, RevisionsAtomType};
use crate::propagate::SavePropagator;
use crate::sanitize::sanitize;
use crate::snapshot::{SnapshotCache, SnapshotSubscription};
use futures::FutureExt;
use pagebuilder_editor::{
    Atom, AtomReader, EditorError, EditorPlugin, Element, GetCallableState,
    GetCallableStateInterceptor, GetElementTree, GetElementTreeArgs, GetElementTreeInterceptor,
    ProviderProps, SaveCallablesResult, SaveCallablesResults, SaveCallablesResultsInterceptor,
};
use std::sync::Arc;

pub const PLUGIN_NAME: &str = "page-editor-event-action-handler";

type PageState = PageEditorEventActionCallableState;
type SaveResult = Result<SaveCallablesResult<PageState>, EditorError>;

/// Page editor extension of the event-action pipeline
pub struct EventActionHandlerPlugin {
    name: String,
    snapshot: SnapshotSubscription,
    get_element_tree: GetElementTreeInterceptor,
    get_callable_state: GetCallableStateInterceptor<PageState>,
    save_callables_results: SaveCallablesResultsInterceptor<PageState>,
}

impl EventActionHandlerPlugin {
    /// Attach to the page and revisions atoms and build the interceptors
    pub fn mount(
        page: Atom<PageAtomType>,
        revisions: AtomReader<RevisionsAtomType>,
        config: PageEditorConfig,
    ) -> Self {
        tracing::info!(
            ?config,
            page_atom = page.key(),
            revisions_atom = revisions.key(),
            "mounting page editor plugin"
        );

        let cache = Arc::new(SnapshotCache::new());
        let snapshot = cache.attach(&page, &revisions);

        Self {
            name: config.name,
            get_element_tree: element_tree_interceptor(),
            get_callable_state: callable_state_interceptor(cache),
            save_callables_results: save_interceptor(SavePropagator::new(page)),
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &Arc<SnapshotCache> {
        self.snapshot.cache()
    }
}

impl EditorPlugin<PageState> for EventActionHandlerPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn extend(&self, mut props: ProviderProps<PageState>) -> ProviderProps<PageState> {
        props.get_element_tree.push(self.get_element_tree.clone());
        props.get_callable_state.push(self.get_callable_state.clone());
        props
            .save_callables_results
            .push(self.save_callables_results.clone());
        props
    }
}

impl Drop for EventActionHandlerPlugin {
    fn drop(&mut self) {
        tracing::info!(name = %self.name, "unmounting page editor plugin");
    }
}

fn element_tree_interceptor() -> GetElementTreeInterceptor {
    Arc::new(|next: GetElementTree| -> GetElementTree {
        Arc::new(move |args: GetElementTreeArgs| retrieve_element_tree(next.clone(), args).boxed())
    })
}

async fn retrieve_element_tree(
    next: GetElementTree,
    args: GetElementTreeArgs,
) -> Result<Element, EditorError> {
    let element = args.element;
    let tree = next(GetElementTreeArgs { element }).await?;
    Ok(sanitize(&tree))
}

fn callable_state_interceptor(
    cache: Arc<SnapshotCache>,
) -> GetCallableStateInterceptor<PageState> {
    Arc::new(move |next: GetCallableState<PageState>| -> GetCallableState<PageState> {
        let cache = cache.clone();
        Arc::new(move |state: PageState| {
            let callable_state = next(state);

            // Upstream values win over the cache
            PageState {
                page: callable_state
                    .page
                    .or_else(|| cache.page().map(|page| (*page).clone())),
                revisions: callable_state
                    .revisions
                    .or_else(|| cache.revisions().map(|revisions| (*revisions).clone())),
                ..callable_state
            }
        })
    })
}

fn save_interceptor(propagator: SavePropagator) -> SaveCallablesResultsInterceptor<PageState> {
    Arc::new(
        move |next: SaveCallablesResults<PageState>| -> SaveCallablesResults<PageState> {
            let propagator = propagator.clone();
            Arc::new(move |input: SaveCallablesResult<PageState>| -> SaveResult {
                let res = next(input.clone())?;
                propagator.propagate(&res)?;

                // Downstream sees this interceptor's input, not `res`
                Ok(input)
            })
        },
    )
}
