//! # Snapshot Cache
//!
//! Interceptor chains are built once, but they run long after that, often
//! across an `.await`. Values captured at build time would be stale, so the
//! chain reads the page and revisions through this cache instead. The cache
//! observes both atoms and is overwritten wholesale on every notification;
//! readers always get the latest complete value.
//!
//! ```text
//! page atom ──notify──▶ SnapshotCache ◀──read── interceptors
//! revisions ──notify──▶
//! ```
//!
//! Both slots start empty and become empty again when the owning
//! [`SnapshotSubscription`] is dropped.

use crate::page::{PageAtomType, RevisionsAtomType};
use arc_swap::ArcSwapOption;
use pagebuilder_editor::{Atom, AtomReader, Subscription};
use std::sync::Arc;

/// Last observed page and revision list
#[derive(Debug, Default)]
pub struct SnapshotCache {
    page: ArcSwapOption<PageAtomType>,
    revisions: ArcSwapOption<RevisionsAtomType>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn page(&self) -> Option<Arc<PageAtomType>> {
        self.page.load_full()
    }

    #[inline]
    pub fn revisions(&self) -> Option<Arc<RevisionsAtomType>> {
        self.revisions.load_full()
    }

    pub fn store_page(&self, page: Arc<PageAtomType>) {
        self.page.store(Some(page));
    }

    pub fn store_revisions(&self, revisions: Arc<RevisionsAtomType>) {
        self.revisions.store(Some(revisions));
    }

    pub fn clear(&self) {
        self.page.store(None);
        self.revisions.store(None);
    }

    /// Seed from the atoms' current values and follow their updates
    pub fn attach(
        self: &Arc<Self>,
        page: &Atom<PageAtomType>,
        revisions: &AtomReader<RevisionsAtomType>,
    ) -> SnapshotSubscription {
        self.store_page(page.get());
        self.store_revisions(revisions.get());

        let cache = self.clone();
        let page_subscription = page.subscribe(move |page| {
            tracing::debug!(page = %page.id, version = page.version, "snapshot cache: page updated");
            cache.store_page(page);
        });

        let cache = self.clone();
        let revisions_subscription = revisions.subscribe(move |revisions| {
            tracing::debug!(count = revisions.len(), "snapshot cache: revisions updated");
            cache.store_revisions(revisions);
        });

        SnapshotSubscription {
            cache: self.clone(),
            subscriptions: vec![page_subscription, revisions_subscription],
        }
    }
}

/// Keeps a [`SnapshotCache`] attached to its atoms
#[derive(Debug)]
pub struct SnapshotSubscription {
    cache: Arc<SnapshotCache>,
    subscriptions: Vec<Subscription>,
}

impl SnapshotSubscription {
    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }
}

impl Drop for SnapshotSubscription {
    fn drop(&mut self) {
        self.subscriptions.clear();
        self.cache.clear();
    }
}
