//! Save propagation: committed pages flow back into the page atom.

use crate::page::{PageAtomType, PageEditorEventActionCallableState};
use pagebuilder_editor::{Atom, EditorError, SaveCallablesResult};

/// Writes the page of a committed save into the page atom
#[derive(Debug, Clone)]
pub struct SavePropagator {
    page: Atom<PageAtomType>,
}

impl SavePropagator {
    pub fn new(page: Atom<PageAtomType>) -> Self {
        Self { page }
    }

    /// Set the page atom if `result` carries a page; setter errors are returned as-is
    pub fn propagate(
        &self,
        result: &SaveCallablesResult<PageEditorEventActionCallableState>,
    ) -> Result<(), EditorError> {
        match &result.state.page {
            Some(page) => {
                tracing::debug!(page = %page.id, version = page.version, "propagating saved page");
                self.page.set(page.clone())
            }
            None => {
                tracing::debug!("save result carries no page");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn with_page(page: Option<PageAtomType>) -> SaveCallablesResult<PageEditorEventActionCallableState> {
        SaveCallablesResult::new(PageEditorEventActionCallableState {
            page,
            ..Default::default()
        })
    }

    #[test]
    fn test_page_is_written_to_atom() {
        let atom = Atom::new("page", PageAtomType::new("p1", "Old"));
        let propagator = SavePropagator::new(atom.clone());

        propagator
            .propagate(&with_page(Some(PageAtomType::new("p1", "New"))))
            .unwrap();

        assert_eq!(atom.get().title, "New");
    }

    #[test]
    fn test_missing_page_leaves_atom_untouched() {
        let atom = Atom::new("page", PageAtomType::new("p1", "Old"));
        let notified = Arc::new(AtomicUsize::new(0));
        let _subscription = {
            let notified = notified.clone();
            atom.subscribe(move |_| {
                notified.fetch_add(1, Ordering::SeqCst);
            })
        };

        SavePropagator::new(atom.clone()).propagate(&with_page(None)).unwrap();

        assert_eq!(atom.get().title, "Old");
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_setter_failure_is_returned() {
        let atom = Atom::new("page", PageAtomType::new("p1", "Old"));
        atom.freeze();

        let err = SavePropagator::new(atom)
            .propagate(&with_page(Some(PageAtomType::new("p1", "New"))))
            .unwrap_err();

        assert!(matches!(err, EditorError::ReadOnly { atom } if atom == "page"));
    }
}
