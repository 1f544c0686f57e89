use std::sync::Arc;

use folio_core::{BrochureId, NavigationState, SubRoute, TopTab};
use tokio::sync::watch;

use super::{events::SelectionEvent, reducer::reduce};

/// Holder of the current [`NavigationState`]. Every change is published as a
/// new snapshot to subscribers.
#[derive(Clone)]
pub struct SelectionStore {
    inner: Arc<watch::Sender<NavigationState>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(NavigationState::default())
    }
}

impl SelectionStore {
    pub fn new(state: NavigationState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(tx),
        }
    }

    pub fn state(&self) -> NavigationState {
        *self.inner.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationState> {
        self.inner.subscribe()
    }

    /// Folds `ev` into the state. Returns whether the snapshot changed.
    pub fn apply(&self, ev: SelectionEvent) -> bool {
        self.inner.send_if_modified(|state| {
            let next = reduce(*state, ev);
            if next == *state {
                return false;
            }
            tracing::debug!(?ev, ?next, "selection changed");
            *state = next;
            true
        })
    }

    pub fn set_top_tab(&self, tab: TopTab) -> bool {
        self.apply(SelectionEvent::TopTabChanged(tab))
    }

    pub fn set_brochure(&self, id: BrochureId, sub_route: Option<SubRoute>) -> bool {
        self.apply(SelectionEvent::BrochureSelected { id, sub_route })
    }

    pub fn set_sub_route(&self, sub_route: SubRoute) -> bool {
        self.apply(SelectionEvent::SubRouteChanged(sub_route))
    }

    pub fn reset(&self) -> bool {
        self.apply(SelectionEvent::Reset)
    }
}
